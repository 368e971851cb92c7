//! In-memory object backend.

use super::ObjectStore;
use crate::{MediaError, MediaResult, ObjectRef};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// In-memory object backend, used in tests and single-node deployments.
pub struct InMemoryObjects {
    objects: DashMap<String, StoredObject>,
    total_size: AtomicU64,
    max_size: Option<u64>,
}

struct StoredObject {
    data: Bytes,
    name: String,
    mime: String,
    etag: String,
}

impl InMemoryObjects {
    /// Creates a new backend without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: DashMap::new(),
            total_size: AtomicU64::new(0),
            max_size: None,
        }
    }

    /// Creates a backend with a total-size quota in bytes.
    #[must_use]
    pub fn with_max_size(max_size: u64) -> Self {
        Self {
            objects: DashMap::new(),
            total_size: AtomicU64::new(0),
            max_size: Some(max_size),
        }
    }

    /// Returns the payload behind a reference, if present.
    pub fn get(&self, reference: &ObjectRef) -> Option<Bytes> {
        self.objects.get(reference.as_str()).map(|o| o.data.clone())
    }

    /// Returns true if a reference resolves to a stored object.
    pub fn contains(&self, reference: &ObjectRef) -> bool {
        self.objects.contains_key(reference.as_str())
    }

    /// Returns the stored MIME type for a reference.
    pub fn mime(&self, reference: &ObjectRef) -> Option<String> {
        self.objects.get(reference.as_str()).map(|o| o.mime.clone())
    }

    /// Returns the content etag for a reference.
    pub fn etag(&self, reference: &ObjectRef) -> Option<String> {
        self.objects.get(reference.as_str()).map(|o| o.etag.clone())
    }

    /// Returns the original upload filename for a reference.
    pub fn filename(&self, reference: &ObjectRef) -> Option<String> {
        self.objects.get(reference.as_str()).map(|o| o.name.clone())
    }

    /// Returns the number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no objects are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes every object.
    pub fn clear(&self) {
        self.objects.clear();
        self.total_size.store(0, Ordering::SeqCst);
    }
}

impl Default for InMemoryObjects {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjects {
    fn name(&self) -> &str {
        "memory"
    }

    async fn store(&self, payload: Bytes, name: &str, mime: &str) -> MediaResult<ObjectRef> {
        let size = payload.len() as u64;

        if let Some(max) = self.max_size {
            let current = self.total_size.load(Ordering::SeqCst);
            if current + size > max {
                return Err(MediaError::Rejected(format!(
                    "quota exceeded: {} + {} > {}",
                    current, size, max
                )));
            }
        }

        let id = Uuid::new_v4().simple().to_string();
        let etag = blake3::hash(&payload).to_hex().to_string();

        self.objects.insert(
            id.clone(),
            StoredObject {
                data: payload,
                name: name.to_string(),
                mime: mime.to_string(),
                etag,
            },
        );
        self.total_size.fetch_add(size, Ordering::SeqCst);

        Ok(ObjectRef::new(id))
    }

    async fn delete(&self, reference: &ObjectRef) -> MediaResult<()> {
        // Absent key is success: the object is gone either way.
        if let Some((_, obj)) = self.objects.remove(reference.as_str()) {
            self.total_size
                .fetch_sub(obj.data.len() as u64, Ordering::SeqCst);
        }
        Ok(())
    }

    fn public_url(&self, reference: &ObjectRef) -> String {
        format!("memory://objects/{}", reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_then_get() {
        let backend = InMemoryObjects::new();
        let data = Bytes::from("sermon audio");

        let reference = backend
            .store(data.clone(), "sermon.mp3", "audio/mpeg")
            .await
            .unwrap();

        assert_eq!(backend.get(&reference), Some(data));
        assert_eq!(backend.mime(&reference).as_deref(), Some("audio/mpeg"));
        assert_eq!(backend.filename(&reference).as_deref(), Some("sermon.mp3"));
        assert!(backend.etag(&reference).is_some());
    }

    #[tokio::test]
    async fn delete_absent_reference_is_success() {
        let backend = InMemoryObjects::new();
        backend
            .delete(&ObjectRef::new("never-stored"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_removes_object() {
        let backend = InMemoryObjects::new();
        let reference = backend
            .store(Bytes::from("x"), "x.bin", "application/octet-stream")
            .await
            .unwrap();

        backend.delete(&reference).await.unwrap();
        assert!(!backend.contains(&reference));
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn quota_rejects_oversized_store() {
        let backend = InMemoryObjects::with_max_size(10);
        backend
            .store(Bytes::from(vec![0u8; 8]), "a", "application/octet-stream")
            .await
            .unwrap();

        let result = backend
            .store(Bytes::from(vec![0u8; 8]), "b", "application/octet-stream")
            .await;
        assert!(matches!(result, Err(MediaError::Rejected(_))));
    }

    #[tokio::test]
    async fn references_are_unique_per_store() {
        let backend = InMemoryObjects::new();
        let a = backend
            .store(Bytes::from("same"), "a", "text/plain")
            .await
            .unwrap();
        let b = backend
            .store(Bytes::from("same"), "a", "text/plain")
            .await
            .unwrap();
        assert_ne!(a, b);
    }
}
