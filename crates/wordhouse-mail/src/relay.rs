//! HTTP mail-relay transport.

use crate::{EmailMessage, MailError, MailResult, MailTransport};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Relay API base URL.
    pub endpoint: String,
    /// Bearer token for the relay API.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl RelayConfig {
    /// Creates a config for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Transport that posts messages to an HTTP mail relay.
pub struct HttpRelayTransport {
    http: Client,
    config: RelayConfig,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<WireAttachment<'a>>,
}

#[derive(Serialize)]
struct WireAttachment<'a> {
    filename: &'a str,
    content_type: &'a str,
    /// Base64-encoded bytes.
    content: String,
}

impl HttpRelayTransport {
    /// Creates a transport for the configured relay.
    pub fn new(config: RelayConfig) -> MailResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Unreachable(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn encode<'a>(message: &'a EmailMessage) -> WireMessage<'a> {
        WireMessage {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
            html: message.html.as_deref(),
            attachments: message
                .attachments
                .iter()
                .map(|a| WireAttachment {
                    filename: &a.filename,
                    content_type: &a.content_type,
                    content: base64::engine::general_purpose::STANDARD.encode(&a.content),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl MailTransport for HttpRelayTransport {
    fn name(&self) -> &str {
        "http-relay"
    }

    async fn send(&self, message: &EmailMessage) -> MailResult<()> {
        let url = format!("{}/messages", self.config.endpoint.trim_end_matches('/'));
        let mut request = self.http.post(url).json(&Self::encode(message));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(to = %message.to, "message accepted by relay");
            Ok(())
        } else if status.is_client_error() {
            Err(MailError::Rejected(format!("relay returned {status}")))
        } else {
            Err(MailError::Unreachable(format!("relay returned {status}")))
        }
    }
}
