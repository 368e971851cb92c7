//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// API result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation error (400).
    #[error("Validation error")]
    Validation(ValidationErrors),

    /// Not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (500).
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Field-level validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// Messages per field.
    pub fields: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates empty validation errors.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Adds a field error.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let errors: Vec<String> = self
            .fields
            .iter()
            .flat_map(|(field, msgs)| msgs.iter().map(move |m| format!("{}: {}", field, m)))
            .collect();
        write!(f, "{}", errors.join(", "))
    }
}

impl ApiError {
    /// Returns the HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Validation errors (if applicable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
    /// Timestamp.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        let (message, errors) = match &self {
            Self::Validation(v) => (v.to_string(), Some(v.fields.clone())),
            _ => (self.to_string(), None),
        };

        let body = ErrorResponse {
            code,
            message,
            errors,
            timestamp: chrono::Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}

// Conversions from other error types at the crate seams.

impl From<wordhouse_store::StoreError> for ApiError {
    fn from(e: wordhouse_store::StoreError) -> Self {
        match e {
            wordhouse_store::StoreError::NotFound { .. } => Self::NotFound(e.to_string()),
        }
    }
}

impl From<wordhouse_media::MediaError> for ApiError {
    fn from(e: wordhouse_media::MediaError) -> Self {
        // Any store failure aborts the caller's operation as an upload
        // failure; the record is left untouched.
        Self::Internal(format!("upload failed: {e}"))
    }
}

impl From<wordhouse_mail::MailError> for ApiError {
    fn from(e: wordhouse_mail::MailError) -> Self {
        Self::Internal(format!("mail delivery failed: {e}"))
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        Self::BadRequest(format!("malformed multipart body: {e}"))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, field_errors) in e.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("validation failed: {:?}", error.code));
                errors.add(field.to_string(), message);
            }
        }
        Self::Validation(errors)
    }
}
