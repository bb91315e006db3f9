//! Lightdash Rust API Client
//!
//! # Creating new api client
//!
//! - [new](LightdashClient::new) - create client with default configuration (from environment)
//! - [with_config](LightdashClient::with_config) - create client with custom configuration
//! - [with_client](LightdashClient::with_client) - create client with configuration and custom reqwest client
//!
//! # Configuration
//!
//! - [get_config](LightdashClient::get_config) - returns configuration
//! - [base_url](LightdashClient::base_url) - normalized instance url used for api calls and browser links
//!

use std::{fmt, sync::Arc, time::Duration};

use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    LIGHTDASH_CLOUD_URL, Result,
    config::{DEFAULT_TIMEOUT_SECS, LIGHTDASH_API_KEY_ENV, LIGHTDASH_TIMEOUT_ENV, LIGHTDASH_URL_ENV},
    http_client::{HttpClient, HttpMetricsSnapshot},
};

/// Personal access token. Wiped from memory on drop, and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value for the `Authorization` header
    pub(crate) fn header_value(&self) -> String {
        format!("ApiKey {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(MASKED)")
    }
}

/// Configuration for the Lightdash client.
///
/// ```rust,no_run
/// use std::time::Duration;
/// use lightdash::prelude::*;
/// # fn create_client() -> Result<LightdashClient, LightdashError> {
/// let config = ClientConfig::default()
///     .base_url("https://lightdash.example.com/")
///     .api_key("token")
///     .timeout(Some(Duration::from_secs(10)));
/// let client = LightdashClient::with_config(config)?;
/// # Ok(client)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Lightdash instance url. If not provided in config, url is determined by:
    /// * The environment variable `LIGHTDASH_URL`, if defined, or
    /// * `https://app.lightdash.cloud`
    ///
    /// Trailing slashes are removed.
    pub base_url: String,

    /// Personal access token. Defaults to environment `LIGHTDASH_API_KEY`.
    pub api_key: Option<ApiKey>,

    /// Request timeout. Defaults to 30 seconds, or `LIGHTDASH_TIMEOUT_SECS`.
    /// `None` disables the timeout.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: std::env::var(LIGHTDASH_URL_ENV)
                .unwrap_or_else(|_| LIGHTDASH_CLOUD_URL.to_string()),
            api_key: std::env::var(LIGHTDASH_API_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty())
                .map(ApiKey::new),
            timeout: parse_timeout(std::env::var(LIGHTDASH_TIMEOUT_ENV).ok().as_deref()),
        }
    }
}

/// Timeout in seconds from the environment. `0` disables the timeout;
/// unset or unparsable values fall back to the default.
fn parse_timeout(value: Option<&str>) -> Option<Duration> {
    let secs = value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl ClientConfig {
    /// Sets the instance url.
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..self
        }
    }

    /// Sets the personal access token.
    pub fn api_key(self, api_key: impl Into<String>) -> Self {
        ClientConfig {
            api_key: Some(ApiKey::new(api_key)),
            ..self
        }
    }

    pub fn timeout(self, timeout: Option<Duration>) -> Self {
        ClientConfig { timeout, ..self }
    }
}

/// Lightdash API client.
pub struct LightdashClient {
    pub(crate) client: Arc<HttpClient>,
    pub(crate) config: ClientConfig,
}

impl fmt::Debug for LightdashClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightdashClient")
            .field("config", &self.config)
            .finish()
    }
}

impl LightdashClient {
    /// Creates a new client with default configuration (environment variables).
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with the provided configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder, config)
    }

    /// Creates a client from a `reqwest::ClientBuilder` and configuration.
    /// ClientBuilder can be customized with proxies, dns servers, user_agent, etc.
    /// The configured timeout is not applied to a caller-provided builder.
    pub fn with_client(client: reqwest::ClientBuilder, config: ClientConfig) -> Result<Self> {
        debug!(url = ?config.base_url, has_key = config.api_key.is_some(), "new client");
        let client = HttpClient::new(client, &config.base_url, config.api_key.clone())?;
        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Returns the configuration.
    pub fn get_config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the instance url, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.client.base_url
    }

    /// Returns true if an api key is configured.
    pub fn has_api_key(&self) -> bool {
        self.client.has_key()
    }

    /// Replaces the api key used for subsequent requests.
    pub fn set_api_key(&self, api_key: impl Into<String>) {
        self.client.set_api_key(ApiKey::new(api_key));
    }

    /// Removes the api key. Requests fail with `LightdashError::Auth` until a key is set.
    pub fn clear_api_key(&self) {
        self.client.clear_api_key();
    }

    /// Returns a snapshot of current HTTP metrics.
    ///
    /// - `total_requests`: Number of HTTP requests sent
    /// - `successful_responses`: Number of successful (2xx) responses
    /// - `errors`: Number of error responses and transport failures
    /// - `bytes_received`: Total bytes received in response bodies
    pub fn http_metrics(&self) -> HttpMetricsSnapshot {
        self.client.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::new("secret-token");
        assert_eq!(format!("{key:?}"), "ApiKey(MASKED)");
        assert_eq!(key.header_value(), "ApiKey secret-token");
    }

    #[test]
    fn test_client_normalizes_base_url() -> Result<()> {
        let config = ClientConfig::default()
            .base_url("https://lightdash.example.com///")
            .api_key("k");
        let client = LightdashClient::with_config(config)?;
        assert_eq!(client.base_url(), "https://lightdash.example.com");
        assert!(client.has_api_key());
        client.clear_api_key();
        assert!(!client.has_api_key());
        Ok(())
    }

    #[test]
    fn test_timeout_from_env() {
        let default = Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(parse_timeout(None), default);
        assert_eq!(parse_timeout(Some("abc")), default);
        assert_eq!(parse_timeout(Some("5")), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout(Some("0")), None);
    }
}
