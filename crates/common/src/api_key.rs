//! API-key conventions shared by both services.
//!
//! Every path under `/api/` needs a matching `X-API-KEY` header; documentation
//! and health paths stay open. How a rejection looks is up to each service.

use axum::http::HeaderMap;

pub const API_KEY_HEADER: &str = "X-API-KEY";

const PUBLIC_MARKERS: [&str; 3] = ["/swagger-ui", "/api-docs", "/actuator"];

/// Docs and health endpoints never require a key.
fn is_public_path(path: &str) -> bool {
    PUBLIC_MARKERS.iter().any(|m| path.contains(m))
}

pub fn requires_api_key(path: &str) -> bool {
    path.starts_with("/api/") && !is_public_path(path)
}

fn presented_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok())
}

pub fn key_matches(headers: &HeaderMap, expected: &str) -> bool {
    matches!(presented_key(headers), Some(k) if k == expected)
}
