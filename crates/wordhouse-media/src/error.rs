//! Object storage error types.

use thiserror::Error;

/// Object storage result type.
pub type MediaResult<T> = Result<T, MediaError>;

/// Object storage errors.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The backend could not be reached (connect, timeout, transport).
    #[error("object store unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the payload (quota, invalid type).
    #[error("object store rejected payload: {0}")]
    Rejected(String),
}

impl MediaError {
    /// Returns a short machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Rejected(_) => "STORAGE_REJECTED",
        }
    }
}
