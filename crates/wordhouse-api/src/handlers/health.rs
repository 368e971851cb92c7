//! Health check handlers.

use crate::response::HealthResponse;
use axum::Json;
use std::time::Instant;

/// Application start time for uptime calculation.
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initializes the start time.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Returns the uptime in seconds.
pub fn uptime_seconds() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        uptime_seconds(),
    ))
}

/// Liveness probe handler.
pub async fn liveness_handler() -> &'static str {
    "OK"
}

/// Readiness probe handler.
pub async fn readiness_handler() -> &'static str {
    "OK"
}
