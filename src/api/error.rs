//! Error taxonomy for the marketplace API client.

use thiserror::Error;

/// Errors surfaced by API calls.
///
/// Every endpoint decodes into a named response type; anything the backend
/// sends that doesn't match is a [`ApiError::Schema`] rather than a value
/// trusted implicitly.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Call requires a session but none is attached.
    #[error("not authenticated - log in first")]
    NotAuthenticated,

    /// 401 - token invalid or expired.
    #[error("unauthorized (401) - session expired or invalid")]
    Unauthorized,

    /// 403 - authenticated but not allowed (e.g. unverified account).
    #[error("forbidden (403) - {reason}")]
    Forbidden { reason: String },

    /// 429 - backend asked us to slow down.
    #[error("rate limited{}", retry_after_secs.map(|s| format!(" - retry after {s}s")).unwrap_or_default())]
    RateLimited { retry_after_secs: Option<u64> },

    /// Connection, DNS or timeout failure.
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body did not match the endpoint's declared shape.
    #[error("unexpected response shape from {endpoint}: {detail}")]
    Schema { endpoint: String, detail: String },
}

impl ApiError {
    /// True for 401/403; the session should be refreshed or dropped.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized | ApiError::Forbidden { .. } | ApiError::NotAuthenticated
        )
    }

    /// True for failures worth retrying with backoff (the poller does).
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::RateLimited { .. } => true,
            ApiError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub(crate) fn schema(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Schema {
            endpoint: endpoint.to_string(),
            detail: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_are_flagged() {
        assert!(ApiError::Unauthorized.is_auth_error());
        assert!(ApiError::NotAuthenticated.is_auth_error());
        assert!(!ApiError::Network("timeout".into()).is_auth_error());
    }

    #[test]
    fn transient_covers_network_ratelimit_and_5xx() {
        assert!(ApiError::Network("reset".into()).is_transient());
        assert!(ApiError::RateLimited { retry_after_secs: Some(3) }.is_transient());
        assert!(ApiError::Http { status: 503, message: String::new() }.is_transient());
        assert!(!ApiError::Http { status: 404, message: String::new() }.is_transient());
        assert!(!ApiError::Unauthorized.is_transient());
    }

    #[test]
    fn rate_limit_display_includes_retry_hint() {
        let err = ApiError::RateLimited { retry_after_secs: Some(30) };
        assert_eq!(err.to_string(), "rate limited - retry after 30s");
        let err = ApiError::RateLimited { retry_after_secs: None };
        assert_eq!(err.to_string(), "rate limited");
    }
}
