//! Remote drive backend.
//!
//! Speaks the HTTP API of the hosted object-storage provider: upload is a
//! two-step create-then-grant-public sequence, delete is a single call with
//! "already gone" treated as success.

use super::ObjectStore;
use crate::{MediaError, MediaResult, ObjectRef};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Remote drive configuration.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Provider API base URL.
    pub endpoint: String,
    /// Bearer token for the provider API.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Grant anyone-with-the-link read access after upload.
    pub public_read: bool,
}

impl DriveConfig {
    /// Creates a config for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
            public_read: true,
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Remote drive client.
pub struct DriveClient {
    http: Client,
    config: DriveConfig,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

impl DriveClient {
    /// Creates a client for the configured provider.
    pub fn new(config: DriveConfig) -> MediaResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MediaError::Unavailable(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.config.endpoint.trim_end_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Maps a transport error: anything that never produced a response is an
    /// availability problem.
    fn transport_error(err: reqwest::Error) -> MediaError {
        MediaError::Unavailable(err.to_string())
    }

    /// Maps a non-success response to the error taxonomy: client errors mean
    /// the provider refused the request, server errors mean it is down.
    fn status_error(context: &str, response: &Response) -> MediaError {
        let status = response.status();
        if status.is_client_error() {
            MediaError::Rejected(format!("{context}: {status}"))
        } else {
            MediaError::Unavailable(format!("{context}: {status}"))
        }
    }

    async fn grant_public_read(&self, id: &str) -> MediaResult<()> {
        let response = self
            .authorize(self.http.post(format!("{}/{}/permissions", self.files_url(), id)))
            .json(&serde_json::json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error("grant public read", &response));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for DriveClient {
    fn name(&self) -> &str {
        "drive"
    }

    async fn store(&self, payload: Bytes, name: &str, mime: &str) -> MediaResult<ObjectRef> {
        let response = self
            .authorize(self.http.post(self.files_url()))
            .query(&[("name", name), ("mimeType", mime)])
            .header(reqwest::header::CONTENT_TYPE, mime)
            .body(payload)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error("upload", &response));
        }

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| MediaError::Rejected(format!("malformed upload response: {e}")))?;

        if self.config.public_read {
            self.grant_public_read(&created.id).await?;
        }

        debug!(id = %created.id, name, "stored object");
        Ok(ObjectRef::new(created.id))
    }

    async fn delete(&self, reference: &ObjectRef) -> MediaResult<()> {
        let response = self
            .authorize(
                self.http
                    .delete(format!("{}/{}", self.files_url(), reference)),
            )
            .send()
            .await
            .map_err(Self::transport_error)?;

        // Already gone counts as deleted.
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }
        Err(Self::status_error("delete", &response))
    }

    fn public_url(&self, reference: &ObjectRef) -> String {
        format!("{}/{}/download", self.files_url(), reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = DriveConfig::new("https://drive.example.com/api")
            .with_api_key("secret")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.endpoint, "https://drive.example.com/api");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.public_read);
    }

    #[test]
    fn public_url_shape() {
        let client =
            DriveClient::new(DriveConfig::new("https://drive.example.com/api/")).unwrap();
        assert_eq!(
            client.public_url(&ObjectRef::new("F1LE")),
            "https://drive.example.com/api/files/F1LE/download"
        );
    }
}
