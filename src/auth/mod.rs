//! Admin gate: a single shared bearer token.
//!
//! Implements constant-time comparison to mitigate timing attacks. There is no
//! session or expiry; destructive endpoints simply check the token on each call.

use axum::http::{header, HeaderMap};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Extract the bearer token from the `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Whether the request carries the configured admin token.
pub fn is_admin(headers: &HeaderMap, expected_token: &str) -> bool {
    match bearer_token(headers) {
        Some(provided) => constant_time_compare(provided, expected_token),
        None => false,
    }
}

/// Check the admin token, mapping failure to a permission error.
pub fn require_admin(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    if is_admin(headers, expected_token) {
        Ok(())
    } else {
        Err(AppError::Permission(
            "Admin privileges required".to_string(),
        ))
    }
}

/// Perform constant-time string comparison.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-token-123", "test-token-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-token-123", "test-token-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-token"));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer secret"),
        );
        assert_eq!(bearer_token(&headers), Some("secret"));
    }

    #[test]
    fn test_is_admin_rejects_missing_header() {
        let headers = HeaderMap::new();
        assert!(!is_admin(&headers, "secret"));
    }

    #[test]
    fn test_is_admin_rejects_non_bearer_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic secret"),
        );
        assert!(!is_admin(&headers, "secret"));
    }

    #[test]
    fn test_is_admin_accepts_matching_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer secret"),
        );
        assert!(is_admin(&headers, "secret"));
        assert!(!is_admin(&headers, "other"));
    }
}
