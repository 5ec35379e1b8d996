//! Shared helpers.

use axum::http::HeaderMap;
use chrono::Utc;

/// Current Unix timestamp in seconds.
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Extract a Bearer token from the Authorization header.
///
/// Returns the token without the "Bearer " prefix, or None if the
/// header is missing, malformed, or empty after the prefix.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
