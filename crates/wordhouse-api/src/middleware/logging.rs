//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Logging layer function.
pub async fn logging_layer(req: Request, next: Next) -> Response {
    let request_id = extract_or_generate_request_id(&req);
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        let start = Instant::now();
        let response = next.run(req).await;

        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        if status >= 500 {
            warn!(status, duration_ms, "request completed with server error");
        } else {
            info!(status, duration_ms, "request completed");
        }

        response
    }
    .instrument(span)
    .await
}

/// Extracts or generates a request id.
fn extract_or_generate_request_id(req: &Request) -> String {
    req.headers()
        .get("X-Request-ID")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
