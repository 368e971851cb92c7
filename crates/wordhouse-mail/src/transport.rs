//! Mail transport trait and local implementations.

use crate::{EmailMessage, MailError, MailResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use tracing::info;

/// Sends one message at a time to an external relay.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Returns the transport name.
    fn name(&self) -> &str;

    /// Delivers a message. No retry is attempted on failure.
    async fn send(&self, message: &EmailMessage) -> MailResult<()>;
}

/// Transport that logs and drops messages.
///
/// Used when no relay is configured, so the rest of the system behaves
/// normally in development.
#[derive(Debug, Default)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, message: &EmailMessage) -> MailResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            attachments = message.attachments.len(),
            "mail relay not configured, dropping message"
        );
        Ok(())
    }
}

/// Test transport that records every send.
///
/// Addresses registered with [`RecordingTransport::fail_for`] error instead,
/// which is how broadcast tests inject per-recipient failures.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<EmailMessage>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingTransport {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sends to `address` fail.
    pub fn fail_for(&self, address: impl Into<String>) {
        self.failing.lock().insert(address.into());
    }

    /// Returns every message sent so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }

    /// Returns the recipients of every sent message, in send order.
    pub fn recipients(&self) -> Vec<String> {
        self.sent.lock().iter().map(|m| m.to.clone()).collect()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, message: &EmailMessage) -> MailResult<()> {
        if self.failing.lock().contains(&message.to) {
            return Err(MailError::Rejected(format!(
                "injected failure for {}",
                message.to
            )));
        }
        self.sent.lock().push(message.clone());
        Ok(())
    }
}
