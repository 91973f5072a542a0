//! Remote API client — single point of HTTP access.
//!
//! Wraps `reqwest` with base URL resolution, call-time bearer injection, and
//! a consistent status-to-error classification. Requests are single-shot:
//! no retry, backoff, or deduplication; the caller owns failure handling.

pub mod auth;
pub mod movies;
pub mod reviews;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// API error taxonomy, classified from the HTTP response (or lack of one).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// No response received (connection refused, DNS, timeout).
    #[error("Cannot connect to the backend: {0}")]
    Network(String),

    /// 401 — invalid or expired credential. Invalidates the session globally.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403 — authenticated but not allowed (role or security config).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 404 — endpoint or record missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409 — conflicting state (duplicate username, duplicate review).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 400 — the server rejected the request payload.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// 5xx and any otherwise unclassified status; message passed through
    /// when available.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body could not be decoded into the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this error must clear the session store (global invalidation).
    pub fn invalidates_session(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

/// Classify a non-success HTTP status plus its body into an [`ApiError`].
pub fn classify_status(status: StatusCode, message: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        StatusCode::BAD_REQUEST => ApiError::Validation(message),
        s => ApiError::Server {
            status: s.as_u16(),
            message,
        },
    }
}

/// Extract a human-readable message from an error body.
///
/// Backends in the wild answer either plain text or `{"message": "..."}`;
/// prefer the JSON field when present.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
        if let Some(message) = value.get("error").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        "<no body>".to_string()
    } else {
        body.trim().to_string()
    }
}

/// HTTP client scoped to a configured base URL.
///
/// The bearer token is merged into headers at call time, not at construction,
/// so a token rotation takes effect on the next call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    health_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.clone(),
            health_timeout: config.health_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Dispatch a request and surface non-success statuses as [`ApiError`].
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!(%status, %message, "api request failed");
        Err(classify_status(status, message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        debug!(path, "GET");
        let request = Self::bearer(self.http.get(self.url(path)), token);
        Self::decode(self.dispatch(request).await?).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        debug!(path, "POST");
        let request = Self::bearer(self.http.post(self.url(path)), token).json(body);
        Self::decode(self.dispatch(request).await?).await
    }

    /// POST where the response body is irrelevant (e.g. registration).
    pub async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        debug!(path, "POST");
        let request = Self::bearer(self.http.post(self.url(path)), token).json(body);
        self.dispatch(request).await.map(|_| ())
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        debug!(path, "PUT");
        let request = Self::bearer(self.http.put(self.url(path)), token).json(body);
        Self::decode(self.dispatch(request).await?).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let request = Self::bearer(self.http.delete(self.url(path)), token);
        self.dispatch(request).await.map(|_| ())
    }

    /// Lightweight availability probe: `GET /movies` under a short deadline.
    /// Any failure, including deadline expiry, reads as "unavailable".
    pub async fn probe(&self) -> bool {
        let result = self
            .http
            .get(self.url("/movies"))
            .timeout(self.health_timeout)
            .send()
            .await;
        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "backend probe failed");
                false
            }
        }
    }
}
