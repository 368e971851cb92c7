//! CORS middleware configuration.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

const METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

/// Creates a CORS layer for the configured origins; an empty list allows any
/// origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(METHODS).allow_headers([
        header::CONTENT_TYPE,
        header::ACCEPT,
        header::ORIGIN,
    ]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer.allow_origin(origins)
    }
}
