//! Mail error types.

use thiserror::Error;

/// Mail result type.
pub type MailResult<T> = Result<T, MailError>;

/// Outbound mail errors.
#[derive(Debug, Error)]
pub enum MailError {
    /// The relay could not be reached.
    #[error("mail relay unreachable: {0}")]
    Unreachable(String),

    /// The relay refused the message.
    #[error("mail relay rejected message: {0}")]
    Rejected(String),
}
