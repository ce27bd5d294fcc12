//! API client implementation using reqwest.
//!
//! This adapter implements the `ApiClient` port. It attaches the headers
//! every portal request carries (JSON content type and accept, the static
//! `X-Custom-Header`, and the bearer token when one is supplied), enforces
//! the configured wait budget, and normalizes failures into the port's
//! error taxonomy. It never retries.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;

use lovejoy_application::ports::{ApiClient, ApiError};

use crate::config::PortalConfig;

/// Name of the static client-identification header.
const CLIENT_HEADER_NAME: &str = "X-Custom-Header";

/// API client backed by reqwest.
pub struct ReqwestApiClient {
    client: Client,
    config: PortalConfig,
}

impl ReqwestApiClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(config: PortalConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("LovejoyPortal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Creates a client reusing an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, config: PortalConfig) -> Self {
        Self { client, config }
    }

    /// Resolves a request path against the base URL.
    ///
    /// Paths are appended to the base, never resolved against its root, so
    /// a base of `https://host/api` plus `/doctorLogin` yields
    /// `https://host/api/doctorLogin`. Paths that do not stay under the
    /// base (missing leading slash, `..` traversal, embedded scheme) are
    /// rejected.
    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        if !path.starts_with('/') {
            return Err(ApiError::InvalidPath(path.to_string()));
        }
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let joined = format!("{base}{path}");
        let url = Url::parse(&joined).map_err(|e| ApiError::InvalidPath(format!("{path}: {e}")))?;
        // Url::parse normalizes `..` segments; anything that escaped the
        // base no longer carries its prefix.
        if !url.as_str().starts_with(base) {
            return Err(ApiError::InvalidPath(path.to_string()));
        }
        Ok(url)
    }

    /// Maps a reqwest failure onto the port's error taxonomy.
    fn map_error(&self, error: &reqwest::Error) -> ApiError {
        if error.is_timeout() {
            return ApiError::Timeout {
                timeout_ms: self.config.timeout_ms(),
            };
        }
        if error.is_connect() {
            return ApiError::Network(error.to_string());
        }
        if error.is_decode() {
            return ApiError::Decode(error.to_string());
        }
        ApiError::Network(error.to_string())
    }

    /// The status text reported in `Http` errors.
    fn status_text(status: StatusCode) -> String {
        status.canonical_reason().unwrap_or("Unknown").to_string()
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(path)?;

        let mut builder = self
            .client
            .request(method, url)
            .timeout(self.config.timeout)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header(CLIENT_HEADER_NAME, &self.config.client_header);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                status_text: Self::status_text(status),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| self.map_error(&e))
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn get(&self, path: &str, token: Option<&str>) -> Result<Value, ApiError> {
        self.execute(Method::GET, path, None, token).await
    }

    async fn post(&self, path: &str, body: &Value, token: Option<&str>) -> Result<Value, ApiError> {
        self.execute(Method::POST, path, Some(body), token).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> ReqwestApiClient {
        ReqwestApiClient::new(PortalConfig::default()).unwrap()
    }

    #[test]
    fn paths_append_to_the_base_url() {
        let url = client().url_for("/doctorLogin").unwrap();
        assert_eq!(
            url.as_str(),
            "https://portal.lovejoy.health/api/doctorLogin"
        );
    }

    #[test]
    fn base_url_path_segment_is_preserved() {
        let config = PortalConfig::with_base_url("http://localhost:8000/api/").unwrap();
        let client = ReqwestApiClient::new(config).unwrap();
        let url = client.url_for("/fetchMyDoctorProfile").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/fetchMyDoctorProfile"
        );
    }

    #[test]
    fn relative_paths_are_rejected() {
        let err = client().url_for("doctorLogin").unwrap_err();
        assert!(matches!(err, ApiError::InvalidPath(_)));
    }

    #[test]
    fn traversal_out_of_the_base_is_rejected() {
        let err = client().url_for("/../admin").unwrap_err();
        assert!(matches!(err, ApiError::InvalidPath(_)));
    }

    #[test]
    fn status_text_uses_canonical_reason() {
        assert_eq!(
            ReqwestApiClient::status_text(StatusCode::SERVICE_UNAVAILABLE),
            "Service Unavailable"
        );
    }
}
