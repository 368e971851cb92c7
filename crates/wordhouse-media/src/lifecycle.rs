//! File-reference lifecycle management.
//!
//! [`FileLifecycle`] owns the invariant that a record's file slot always
//! points at a live object:
//!
//! - on create, the object is stored before the record ever carries the
//!   reference, so no slot can point at nothing;
//! - on replace, the new object is stored and confirmed **before** the old
//!   one is deleted, so a failed re-upload never destroys a still-valid
//!   asset;
//! - on record delete, every slot's object is released best-effort before the
//!   record goes away.
//!
//! Old-object and cascade deletions are fire-and-forget: an orphaned object
//! is acceptable, a broken reference is not. Failures in that cleanup path
//! are logged and recorded in a bounded in-memory log for observability, and
//! never fail the caller's primary operation.

use crate::{MediaResult, ObjectRef, ObjectStore};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// Cleanup failures retained for inspection.
const FAILURE_LOG_CAPACITY: usize = 64;

/// An uploaded file payload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original filename.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub payload: Bytes,
}

impl FileUpload {
    /// Creates an upload.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            payload: payload.into(),
        }
    }
}

/// A recorded best-effort cleanup failure.
#[derive(Debug, Clone)]
pub struct CleanupFailure {
    /// The reference whose deletion failed.
    pub reference: String,
    /// The backend error.
    pub error: String,
    /// When the failure happened.
    pub at: DateTime<Utc>,
}

/// Manages the lifecycle of object references held by record file slots.
pub struct FileLifecycle {
    store: Arc<dyn ObjectStore>,
    failures: Mutex<VecDeque<CleanupFailure>>,
}

impl FileLifecycle {
    /// Creates a lifecycle manager over a backend.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            failures: Mutex::new(VecDeque::new()),
        }
    }

    /// Returns the underlying object store.
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Stores a new upload for a previously empty slot.
    ///
    /// Nothing existed before, so a failure here leaves no orphan; the error
    /// aborts the caller's whole operation.
    pub async fn attach(&self, upload: FileUpload) -> MediaResult<ObjectRef> {
        self.store
            .store(upload.payload, &upload.name, &upload.content_type)
            .await
    }

    /// Replaces a slot's object with a new upload.
    ///
    /// The new object is stored first; only once that succeeds is the old
    /// reference released. A store failure propagates with the old object
    /// untouched, so the record's slot stays valid.
    pub async fn replace(
        &self,
        current: Option<&str>,
        upload: FileUpload,
    ) -> MediaResult<ObjectRef> {
        let new_ref = self.attach(upload).await?;

        if let Some(old) = current {
            self.release(old).await;
        }

        Ok(new_ref)
    }

    /// Best-effort release of a stored slot value.
    ///
    /// Unparsable values mean there is nothing to delete. Backend failures
    /// are logged and recorded, never surfaced: the slot is being cleared
    /// regardless.
    pub async fn release(&self, raw: &str) {
        let Some(reference) = ObjectRef::parse(raw) else {
            debug!(value = raw, "no deletable reference in slot value, skipping");
            return;
        };

        if let Err(err) = self.store.delete(&reference).await {
            warn!(reference = %reference, error = %err, "object cleanup failed");
            self.record_failure(&reference, &err.to_string());
        } else {
            debug!(reference = %reference, "released object");
        }
    }

    /// Releases every reference held by a record being deleted.
    pub async fn release_all<'a>(&self, references: impl IntoIterator<Item = &'a str>) {
        for reference in references {
            self.release(reference).await;
        }
    }

    /// Returns the recent cleanup failures, oldest first.
    ///
    /// Observability hook only; the HTTP contract never surfaces these.
    pub fn recent_failures(&self) -> Vec<CleanupFailure> {
        self.failures.lock().iter().cloned().collect()
    }

    fn record_failure(&self, reference: &ObjectRef, error: &str) {
        let mut failures = self.failures.lock();
        if failures.len() == FAILURE_LOG_CAPACITY {
            failures.pop_front();
        }
        failures.push_back(CleanupFailure {
            reference: reference.as_str().to_string(),
            error: error.to_string(),
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryObjects, MediaError};
    use async_trait::async_trait;

    fn upload(name: &str) -> FileUpload {
        FileUpload::new(name, "application/octet-stream", format!("payload of {name}"))
    }

    fn lifecycle() -> (Arc<InMemoryObjects>, FileLifecycle) {
        let backend = Arc::new(InMemoryObjects::new());
        let manager = FileLifecycle::new(backend.clone());
        (backend, manager)
    }

    /// Backend where stores fail but deletes work, for replace-failure tests.
    struct StoreDown(Arc<InMemoryObjects>);

    #[async_trait]
    impl ObjectStore for StoreDown {
        fn name(&self) -> &str {
            "store-down"
        }

        async fn store(&self, _: Bytes, _: &str, _: &str) -> MediaResult<ObjectRef> {
            Err(MediaError::Unavailable("backend offline".into()))
        }

        async fn delete(&self, reference: &ObjectRef) -> MediaResult<()> {
            self.0.delete(reference).await
        }

        fn public_url(&self, reference: &ObjectRef) -> String {
            self.0.public_url(reference)
        }
    }

    /// Backend where deletes always fail, for cleanup-log tests.
    struct DeleteDown(InMemoryObjects);

    #[async_trait]
    impl ObjectStore for DeleteDown {
        fn name(&self) -> &str {
            "delete-down"
        }

        async fn store(&self, payload: Bytes, name: &str, mime: &str) -> MediaResult<ObjectRef> {
            self.0.store(payload, name, mime).await
        }

        async fn delete(&self, _: &ObjectRef) -> MediaResult<()> {
            Err(MediaError::Unavailable("backend offline".into()))
        }

        fn public_url(&self, reference: &ObjectRef) -> String {
            self.0.public_url(reference)
        }
    }

    #[tokio::test]
    async fn attach_stores_payload() {
        let (backend, manager) = lifecycle();
        let reference = manager.attach(upload("thumb.png")).await.unwrap();
        assert!(backend.contains(&reference));
    }

    #[tokio::test]
    async fn replace_deletes_old_only_after_new_is_stored() {
        let (backend, manager) = lifecycle();
        let old = manager.attach(upload("v1.mp3")).await.unwrap();

        let new = manager
            .replace(Some(old.as_str()), upload("v2.mp3"))
            .await
            .unwrap();

        assert!(backend.contains(&new));
        assert!(!backend.contains(&old));
    }

    #[tokio::test]
    async fn failed_store_preserves_old_object() {
        let healthy = Arc::new(InMemoryObjects::new());
        let old = healthy
            .store(Bytes::from("keep me"), "v1.mp3", "audio/mpeg")
            .await
            .unwrap();

        let manager = FileLifecycle::new(Arc::new(StoreDown(healthy.clone())));
        let result = manager.replace(Some(old.as_str()), upload("v2.mp3")).await;

        assert!(matches!(result, Err(MediaError::Unavailable(_))));
        // The old object must still resolve: the delete step never ran.
        assert!(healthy.contains(&old));
    }

    #[tokio::test]
    async fn replace_into_empty_slot_deletes_nothing() {
        let (backend, manager) = lifecycle();
        let reference = manager.replace(None, upload("first.png")).await.unwrap();
        assert!(backend.contains(&reference));
        assert_eq!(backend.len(), 1);
    }

    #[tokio::test]
    async fn release_tolerates_unparsable_values() {
        let (_, manager) = lifecycle();
        manager.release("").await;
        manager.release("not a reference!").await;
        assert!(manager.recent_failures().is_empty());
    }

    #[tokio::test]
    async fn release_of_absent_object_is_success() {
        let (_, manager) = lifecycle();
        manager.release("already-gone").await;
        assert!(manager.recent_failures().is_empty());
    }

    #[tokio::test]
    async fn release_parses_url_embedded_reference() {
        let (backend, manager) = lifecycle();
        let reference = manager.attach(upload("art.png")).await.unwrap();

        manager
            .release(&format!(
                "https://drive.example.com/uc?export=download&id={reference}"
            ))
            .await;

        assert!(!backend.contains(&reference));
    }

    #[tokio::test]
    async fn cascade_release_covers_every_slot() {
        let (backend, manager) = lifecycle();
        let thumb = manager.attach(upload("thumb.png")).await.unwrap();
        let audio = manager.attach(upload("audio.mp3")).await.unwrap();

        manager
            .release_all([thumb.as_str(), audio.as_str()])
            .await;

        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn cleanup_failure_is_recorded_not_raised() {
        let backend = InMemoryObjects::new();
        let reference = backend
            .store(Bytes::from("x"), "x", "text/plain")
            .await
            .unwrap();

        let manager = FileLifecycle::new(Arc::new(DeleteDown(backend)));
        manager.release(reference.as_str()).await;

        let failures = manager.recent_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].reference, reference.as_str());
        assert!(failures[0].error.contains("offline"));
    }

    #[tokio::test]
    async fn failure_log_is_bounded() {
        let manager = FileLifecycle::new(Arc::new(DeleteDown(InMemoryObjects::new())));
        for i in 0..(FAILURE_LOG_CAPACITY + 10) {
            manager.release(&format!("ref-{i}")).await;
        }
        assert_eq!(manager.recent_failures().len(), FAILURE_LOG_CAPACITY);
    }
}
