//! Store error types.

use thiserror::Error;

/// Store result type.
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested document id does not exist in the collection.
    #[error("{collection} not found: {id}")]
    NotFound {
        /// Collection name.
        collection: &'static str,
        /// The missing id.
        id: String,
    },
}

impl StoreError {
    /// Creates a not-found error for a collection.
    pub fn not_found(collection: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}
