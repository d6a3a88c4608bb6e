//! HTTP plumbing shared by all endpoint groups.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::ApiError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the marketplace REST backend.
///
/// The access token is injected from the owned [`crate::session::Session`];
/// the client itself never reads global state.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Attach the access token from a logged-in session.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Per-request timeout; a hung backend must not stall the event loop.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url).timeout(self.timeout);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Fail early when an endpoint needs a session and none is attached.
    pub(crate) fn require_auth(&self) -> Result<(), ApiError> {
        if self.access_token.is_some() {
            Ok(())
        } else {
            Err(ApiError::NotAuthenticated)
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        Self::decode(path, response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::decode(path, response).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).send().await?;
        Self::decode(path, response).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::decode(path, response).await
    }

    /// PUT with no body and no interesting response payload.
    pub(crate) async fn put_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::PUT, path).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        Self::decode(path, response).await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Map non-success statuses to the error taxonomy, pulling the message
    /// from the backend's `{"error": ...}` / `{"detail": ...}` convention.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);

        debug!(status = %status, %message, "api call failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden { reason: message },
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
                retry_after_secs: retry_after,
            },
            _ => ApiError::Http {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ApiError::schema(path, err))
    }
}

fn extract_error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        detail: Option<String>,
    }
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.error.or(e.detail))
        .unwrap_or_else(|| body.chars().take(200).collect())
}
