//! Outbound email for the Wordhouse content backend.
//!
//! A [`MailTransport`] sends one [`EmailMessage`] at a time; implementations
//! cover the HTTP mail relay, a log-and-drop transport for relay-less
//! deployments, and a recording transport for tests. [`broadcast`] fans a
//! personalized message out to every subscriber concurrently, collecting
//! per-recipient failures without aborting the batch.

pub mod broadcast;
pub mod error;
pub mod message;
pub mod relay;
pub mod transport;

pub use broadcast::{broadcast, BroadcastFailure, BroadcastOutcome, Recipient};
pub use error::{MailError, MailResult};
pub use message::{Attachment, EmailMessage};
pub use relay::{HttpRelayTransport, RelayConfig};
pub use transport::{LogTransport, MailTransport, RecordingTransport};
