//! CORS configuration using tower-http.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Preflight cache lifetime.
const MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Credentialed CORS for the browser front end.
///
/// Allows:
/// - The listed origins only (unparseable entries are skipped)
/// - GET, POST, PATCH, PUT, DELETE, OPTIONS
/// - `Origin`, `Content-Type` and `Authorization` request headers
/// - Credentials, so the session cookies travel cross-origin
pub fn session_cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(MAX_AGE)
}
