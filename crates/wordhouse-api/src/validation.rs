//! Request validation utilities.

use crate::{error::ValidationErrors, ApiError, ApiResult};
use chrono::{DateTime, NaiveDate, Utc};

/// Parses a date field accepted as RFC 3339 or plain `YYYY-MM-DD`.
pub fn parse_date(field: &str, value: &str) -> ApiResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    Err(ApiError::BadRequest(format!(
        "invalid date for {field}: '{value}'"
    )))
}

/// Validation builder for request bodies and form fields.
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    /// Requires a non-blank string.
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.add(field, "is required");
        }
        self
    }

    /// Validates maximum length.
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        if value.len() > max {
            self.errors
                .add(field, format!("must be at most {} characters", max));
        }
        self
    }

    /// Validates an email address when non-empty.
    pub fn email(mut self, field: &str, value: &str) -> Self {
        if !value.is_empty() && !is_valid_email(value) {
            self.errors.add(field, "must be a valid email address");
        }
        self
    }

    /// Rejects an explicit null for a required field.
    pub fn not_cleared<T>(mut self, field: &str, value: &wordhouse_core::Patch<T>) -> Self {
        if value.is_clear() {
            self.errors.add(field, "cannot be null");
        }
        self
    }

    /// Finishes validation and returns any errors.
    pub fn finish(self) -> ApiResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple email validation.
fn is_valid_email(email: &str) -> bool {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let domain = &domain[1..];

        !local.is_empty()
            && !domain.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    } else {
        false
    }
}
