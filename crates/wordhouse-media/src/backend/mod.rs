//! Object storage backends.

pub mod drive;
pub mod memory;

use crate::{MediaResult, ObjectRef};
use async_trait::async_trait;
use bytes::Bytes;

/// A backend that stores binary payloads and hands out opaque references.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the backend name.
    fn name(&self) -> &str;

    /// Stores a payload durably and makes it publicly readable.
    ///
    /// Returns the reference the caller must persist to reach the object
    /// again. Fails with [`crate::MediaError::Unavailable`] when the backend
    /// cannot be reached and [`crate::MediaError::Rejected`] when it refuses
    /// the payload.
    async fn store(&self, payload: Bytes, name: &str, mime: &str) -> MediaResult<ObjectRef>;

    /// Deletes the object behind a reference.
    ///
    /// Idempotent in intent: a backend "not found" response counts as
    /// success, since the object is gone either way. Only transport-level
    /// failure surfaces as an error.
    async fn delete(&self, reference: &ObjectRef) -> MediaResult<()>;

    /// Returns the provider-style public download URL for a reference.
    fn public_url(&self, reference: &ObjectRef) -> String;
}
