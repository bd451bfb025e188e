use axum::http::HeaderMap;

use crate::error::ApiError;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Request-scoped capability check run before any handler logic.
///
/// If no key is configured (local dev), access control is disabled so a
/// misconfigured instance cannot lock you out; never deploy an externally
/// reachable server without a key.
///
/// # Errors
/// Returns `ApiError::Unauthorized` when a key is configured and the
/// supplied header is missing or does not match.
pub fn require_api_key(configured: Option<&str>, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = configured else {
        return Ok(());
    };

    match headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        Some(supplied) if supplied == expected => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}
