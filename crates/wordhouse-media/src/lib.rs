//! Object storage for the Wordhouse content backend.
//!
//! This crate owns the binary-asset side of the system:
//! - an opaque [`ObjectRef`] with tolerant parsing of legacy stored formats,
//! - the [`ObjectStore`] backend trait with in-memory and remote-drive
//!   implementations,
//! - the [`FileLifecycle`] manager, which keeps record file slots pointing at
//!   live objects across create, replace, and cascade delete.

pub mod backend;
pub mod error;
pub mod lifecycle;
pub mod reference;

pub use backend::{drive::DriveClient, drive::DriveConfig, memory::InMemoryObjects, ObjectStore};
pub use error::{MediaError, MediaResult};
pub use lifecycle::{CleanupFailure, FileLifecycle, FileUpload};
pub use reference::ObjectRef;
