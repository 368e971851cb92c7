//! REST API layer for the Wordhouse content backend.
//!
//! This crate provides:
//! - Per-module routers (sermons, events, devotionals, blogs, radio, contact)
//! - Multipart form extraction for file-bearing endpoints
//! - Request validation
//! - Error-to-HTTP mapping
//! - CORS and request logging middleware

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
