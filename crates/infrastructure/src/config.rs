//! Portal connection configuration.
//!
//! Every value has a compiled-in production default and an environment
//! override, matching how the hosted portal is deployed:
//! - `LOVEJOY_API_URL` - backend base URL
//! - `LOVEJOY_CLIENT_HEADER` - value for the `X-Custom-Header` the
//!   backend's gateway requires on every request
//! - `LOVEJOY_TIMEOUT_MS` - request wait budget in milliseconds

use std::time::Duration;

use url::Url;

/// Production backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://portal.lovejoy.health/api";
/// Default client-identification header value. Opaque to this client; the
/// backend's gateway rejects requests without it.
pub const DEFAULT_CLIENT_HEADER: &str = "lovejoy-health-portal";
/// Default request wait budget.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured base URL does not parse.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The configured timeout does not parse as milliseconds.
    #[error("invalid timeout {value:?}")]
    InvalidTimeout {
        /// The offending value.
        value: String,
    },
}

/// Connection settings for the portal backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Backend base URL; request paths are appended to it.
    pub base_url: Url,
    /// Value sent as `X-Custom-Header` on every request.
    pub client_header: String,
    /// Per-request wait budget.
    pub timeout: Duration,
}

impl PortalConfig {
    /// Builds a configuration from an explicit base URL, keeping the
    /// default header and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            client_header: DEFAULT_CLIENT_HEADER.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        })
    }

    /// Reads configuration from the environment, falling back to the
    /// production defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when an override is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("LOVEJOY_API_URL") {
            config.base_url = Url::parse(&url).map_err(|e| ConfigError::InvalidBaseUrl {
                url,
                reason: e.to_string(),
            })?;
        }
        if let Ok(header) = std::env::var("LOVEJOY_CLIENT_HEADER") {
            config.client_header = header;
        }
        if let Ok(value) = std::env::var("LOVEJOY_TIMEOUT_MS") {
            let millis: u64 = value
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { value })?;
            config.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// The wait budget in milliseconds, as reported in timeout errors.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for PortalConfig {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            client_header: DEFAULT_CLIENT_HEADER.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_production() {
        let config = PortalConfig::default();
        assert_eq!(config.base_url.as_str(), "https://portal.lovejoy.health/api");
        assert_eq!(config.client_header, "lovejoy-health-portal");
        assert_eq!(config.timeout_ms(), 10_000);
    }

    #[test]
    fn explicit_base_url_keeps_other_defaults() {
        let config = PortalConfig::with_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/api");
        assert_eq!(config.client_header, "lovejoy-health-portal");
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let err = PortalConfig::with_base_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }
}
