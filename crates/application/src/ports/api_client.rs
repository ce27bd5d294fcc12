//! API client port
//!
//! Defines the interface for reaching the portal backend. The adapter in
//! the infrastructure crate implements this over reqwest; tests implement
//! it in memory.

use async_trait::async_trait;
use serde_json::Value;

/// Transport-level failures raised by the API client.
///
/// These cover everything up to and including the HTTP status line. A 2xx
/// response whose envelope reports failure is not a transport failure and
/// is handled above this port.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend could not be reached (DNS, connect, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// No response arrived within the wait budget.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The budget that elapsed.
        timeout_ms: u64,
    },

    /// The backend responded with a non-2xx status.
    #[error("HTTP {status} {status_text}")]
    Http {
        /// The status code.
        status: u16,
        /// The canonical status text.
        status_text: String,
    },

    /// The request path does not resolve under the configured base URL.
    #[error("invalid request path: {0}")]
    InvalidPath(String),

    /// The response body was not the JSON shape the endpoint promises.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Port for issuing requests against the portal backend.
///
/// Implementations attach the shared headers (JSON content type and accept,
/// the static client-identification header, and the bearer token when one
/// is supplied) and enforce the request timeout. No implementation retries.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issues a GET against `path`, relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any transport failure.
    async fn get(&self, path: &str, token: Option<&str>) -> Result<Value, ApiError>;

    /// Issues a POST with a JSON body against `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on any transport failure.
    async fn post(&self, path: &str, body: &Value, token: Option<&str>) -> Result<Value, ApiError>;
}
