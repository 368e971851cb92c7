//! Request extraction helpers.

use crate::ApiResult;
use async_trait::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts, Multipart};
use axum::http::request::Parts;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use wordhouse_media::FileUpload;

/// A fully read multipart form: text fields by name, file parts in arrival
/// order with their field name.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: Vec<(String, FileUpload)>,
}

impl FormData {
    /// Drains a multipart stream into memory.
    ///
    /// A part with a filename becomes a file upload; everything else is a
    /// text field. Parts without a field name are skipped.
    pub async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(String::from) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(String::from) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let payload = field.bytes().await?;
                form.files
                    .push((name, FileUpload::new(filename, content_type, payload)));
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Returns a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns the first file uploaded under `name`.
    pub fn file(&self, name: &str) -> Option<&FileUpload> {
        self.files
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, upload)| upload)
    }

    /// Returns every file uploaded under `name`.
    pub fn files_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FileUpload> {
        self.files
            .iter()
            .filter(move |(field, _)| field == name)
            .map(|(_, upload)| upload)
    }
}

/// The caller's network address, as the view counter sees it.
///
/// Prefers `X-Forwarded-For` (first hop), then `X-Real-IP`, then the peer
/// address; falls back to `"unknown"` when none is available.
#[derive(Debug, Clone)]
pub struct ClientAddr(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(forwarded) = parts.headers.get("X-Forwarded-For") {
            if let Ok(value) = forwarded.to_str() {
                if let Some(ip) = value.split(',').next() {
                    let ip = ip.trim();
                    if !ip.is_empty() {
                        return Ok(Self(ip.to_string()));
                    }
                }
            }
        }

        if let Some(real_ip) = parts.headers.get("X-Real-IP") {
            if let Ok(value) = real_ip.to_str() {
                return Ok(Self(value.to_string()));
            }
        }

        if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Ok(Self(addr.ip().to_string()));
        }

        Ok(Self("unknown".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> ClientAddr {
        let (mut parts, ()) = request.into_parts();
        ClientAddr::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn forwarded_for_takes_first_hop() {
        let request = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.0, "203.0.113.7");
    }

    #[tokio::test]
    async fn real_ip_is_second_choice() {
        let request = Request::builder()
            .header("X-Real-IP", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.0, "198.51.100.2");
    }

    #[tokio::test]
    async fn falls_back_to_unknown() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await.0, "unknown");
    }
}
