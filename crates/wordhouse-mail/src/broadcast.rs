//! Personalized broadcast fan-out.

use crate::{Attachment, EmailMessage, MailTransport};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Placeholder substituted with each recipient's name.
const NAME_PLACEHOLDER: &str = "{name}";

/// One broadcast recipient.
#[derive(Debug, Clone)]
pub struct Recipient {
    /// Name substituted into the subject and body.
    pub name: String,
    /// Destination address.
    pub email: String,
}

/// A failed delivery within a broadcast.
#[derive(Debug, Clone)]
pub struct BroadcastFailure {
    /// The recipient address.
    pub email: String,
    /// The transport error.
    pub error: String,
}

/// Result of a broadcast: how many deliveries were attempted and which
/// failed. Success of the operation means "attempted delivery to all
/// recipients", not "delivered to all".
#[derive(Debug, Default)]
pub struct BroadcastOutcome {
    /// Number of deliveries attempted.
    pub attempted: usize,
    /// Per-recipient failures, collected for observability.
    pub failures: Vec<BroadcastFailure>,
}

impl BroadcastOutcome {
    /// Returns the number of successful deliveries.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.attempted - self.failures.len()
    }
}

/// Replaces every `{name}` occurrence in a template.
fn personalize(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

/// Sends one personalized message per recipient.
///
/// Deliveries run concurrently with no ordering or bound, and the call
/// resolves when every send has settled. A failed send is logged and
/// collected; it never aborts the batch.
pub async fn broadcast(
    transport: Arc<dyn MailTransport>,
    from: &str,
    recipients: &[Recipient],
    subject: &str,
    body: &str,
    attachments: &[Attachment],
) -> BroadcastOutcome {
    let sends = recipients.iter().map(|recipient| {
        let transport = transport.clone();
        let message = EmailMessage::new(
            from,
            recipient.email.clone(),
            personalize(subject, &recipient.name),
            personalize(body, &recipient.name),
        )
        .with_html(personalize(body, &recipient.name))
        .with_attachments(attachments.to_vec());

        async move {
            match transport.send(&message).await {
                Ok(()) => None,
                Err(err) => {
                    warn!(to = %message.to, error = %err, "broadcast send failed");
                    Some(BroadcastFailure {
                        email: message.to.clone(),
                        error: err.to_string(),
                    })
                }
            }
        }
    });

    let failures: Vec<BroadcastFailure> = join_all(sends).await.into_iter().flatten().collect();

    let outcome = BroadcastOutcome {
        attempted: recipients.len(),
        failures,
    };
    info!(
        attempted = outcome.attempted,
        failed = outcome.failures.len(),
        "broadcast settled"
    );
    outcome
}
