//! HttpClient middleware used by LightdashClient
//!
//! Responsible for
//!  - handing all HTTP api requests
//!  - logging/tracing
//!  - unwrapping the `{status, results}` response envelope
//!  - mapping non-2xx responses and transport failures into `LightdashError`
//!
//! There are no retries: each call is a single attempt. Timeouts are set on the
//! underlying `reqwest::Client` and surface as transport errors.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;
use reqwest::{ClientBuilder, Method, header::AUTHORIZATION};
use serde::{Deserialize, de::DeserializeOwned};
use snafu::prelude::*;
use tracing::{debug, error, trace};

use crate::{Result, client::ApiKey, config::API_PREFIX, prelude::*};

/// HTTP metrics tracked using atomic counters for thread-safe access.
/// These counters are cumulative and never reset during the client's lifetime.
#[derive(Debug, Default)]
pub struct HttpMetrics {
    /// Total number of HTTP requests sent to the server
    total_requests: AtomicU64,
    /// Total number of successful responses (2xx status codes)
    successful_responses: AtomicU64,
    /// Total number of failed requests (non-2xx status codes and transport errors)
    errors: AtomicU64,
    /// Total bytes received in response bodies
    bytes_received: AtomicU64,
}

impl HttpMetrics {
    /// Returns a snapshot of current metrics as plain u64 values
    pub fn snapshot(&self) -> HttpMetricsSnapshot {
        HttpMetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_responses: self.successful_responses.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
        }
    }

    fn increment_requests(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_success(&self) {
        self.successful_responses.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn add_bytes_received(&self, bytes: u64) {
        self.bytes_received.fetch_add(bytes, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of HTTP metrics with plain u64 values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpMetricsSnapshot {
    /// Total number of HTTP requests sent to the server
    pub total_requests: u64,
    /// Total number of successful responses (2xx status codes)
    pub successful_responses: u64,
    /// Total number of failed requests
    pub errors: u64,
    /// Total bytes received in response bodies
    pub bytes_received: u64,
}

impl fmt::Display for HttpMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requests={} success={} errors={} recv={}",
            self.total_requests,
            self.successful_responses,
            self.errors,
            format_bytes(self.bytes_received),
        )
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes}B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Response envelope used by every Lightdash rest endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[allow(dead_code)]
    pub status: String,
    pub results: T,
}

#[derive(Debug)]
pub(crate) struct HttpClient {
    pub client: reqwest::Client,

    /// Instance url without trailing slash (e.g., "https://app.lightdash.cloud")
    pub base_url: String,

    pub api_key: Arc<Mutex<Option<ApiKey>>>,

    /// HTTP request/response metrics
    pub metrics: Arc<HttpMetrics>,
}

impl HttpClient {
    pub fn new(builder: ClientBuilder, base_url: &str, api_key: Option<ApiKey>) -> Result<Self> {
        let client = builder.build().context(TransportSnafu {
            method: "client-init",
            url: "",
        })?;
        Ok(HttpClient {
            client,
            base_url: normalize_base_url(base_url).to_string(),
            api_key: Arc::new(Mutex::new(api_key)),
            metrics: Arc::new(HttpMetrics::default()),
        })
    }

    /// Returns a snapshot of current HTTP metrics
    pub fn metrics_snapshot(&self) -> HttpMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Returns true if api_key has been initialized.
    pub fn has_key(&self) -> bool {
        self.api_key.lock().is_some()
    }

    /// Sets the API key for authenticated requests.
    pub fn set_api_key(&self, api_key: ApiKey) {
        *self.api_key.lock() = Some(api_key);
    }

    /// Clears the api key if set.
    pub fn clear_api_key(&self) {
        self.api_key.lock().take();
    }

    /// Authenticated GET of `/api/v1{path}`, returning the `results` field of the envelope.
    pub(crate) async fn get_results<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response: ApiResponse<T> = self.get_request(&format!("{API_PREFIX}{path}")).await?;
        Ok(response.results)
    }

    /// This function handles all lightdash rest api requests
    /// - adds the `Authorization: ApiKey ...` header
    /// - maps non-2xx status into `LightdashError::Remote`
    /// - maps network failure into `LightdashError::Transport`
    /// - deserializes json response body into return type T
    pub(crate) async fn get_request<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let auth_header = {
            let key = self.api_key.lock();
            key.as_ref()
                .map(ApiKey::header_value)
                .ok_or_else(|| LightdashError::Auth {
                    message: "API key not set. Configure LIGHTDASH_API_KEY or call set_api_key()"
                        .to_string(),
                })?
        };
        let full_url = format!("{}{}", self.base_url, path);
        // don't log headers so we don't leak api token
        debug!(url = %full_url, "GET");

        self.metrics.increment_requests();
        let response = match self
            .client
            .request(Method::GET, &full_url)
            .header(AUTHORIZATION, auth_header)
            .send()
            .await
        {
            Ok(response) => response,
            Err(source) => {
                self.metrics.increment_errors();
                error!(?source, url = %full_url, timeout = source.is_timeout(), "http");
                return Err(LightdashError::Transport {
                    method: Method::GET.to_string(),
                    url: full_url,
                    source,
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            self.metrics.increment_errors();
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            let message = response.text().await.unwrap_or_default();
            error!(code = status.as_u16(), %status_text, url = %full_url, "http");
            return Err(LightdashError::Remote {
                status: status.as_u16(),
                status_text,
                url: full_url,
                message,
            });
        }

        let body = response.bytes().await.context(TransportSnafu {
            method: Method::GET.to_string(),
            url: &full_url,
        })?;
        self.metrics.increment_success();
        self.metrics.add_bytes_received(body.len() as u64);
        log_response(path, &body);
        deserialize_json(&body)
    }
}

// dump json response, for debugging
// requires RUST_LOG=lightdash::http_json=trace
fn log_response(path: &str, body: &[u8]) {
    if tracing::enabled!(target: "lightdash::http_json", tracing::Level::TRACE) {
        trace!(target: "lightdash::http_json", "Response path={path} body={}",
            String::from_utf8_lossy(body)
        );
    }
}

// deserialize, reporting errors with 'serde_path_to_error', which provides
// detailed json path to the error
pub(crate) fn deserialize_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(value) => Ok(value),
        Err(err) => {
            error!("Deserialization failed at {}: {}", err.path(), err);
            Err(LightdashError::Deserialization {
                source: err.into_inner(),
            })
        }
    }
}
