//! HTTP client for the Elsevier APIs.
//!
//! Wraps reqwest with:
//! - API key and institutional token headers
//! - Minimum-interval request throttling
//! - Retry with backoff for transient failures
//! - Status-code to error mapping

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// Maximum retries for transient failures
const MAX_RETRIES: u32 = 2;

/// Delay before the first retry (doubles each time)
const RETRY_DELAY_MS: u64 = 500;

/// Client for the Elsevier content APIs.
///
/// Cheap to clone; clones share the underlying connection pool, the
/// request throttle, and the request counter.
#[derive(Clone)]
pub struct ElsevierClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
    config: Config,
    /// Start time of the most recent request, for fair-use spacing
    last_request: Mutex<Option<Instant>>,
    /// Requests sent over the client lifetime
    requests_issued: AtomicU64,
}

impl ElsevierClient {
    /// Create a client from a configuration.
    pub fn new(config: Config) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", config.base_url, e)))?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("elsar/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                last_request: Mutex::new(None),
                requests_issued: AtomicU64::new(0),
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Requests sent over the client lifetime, pagination included.
    pub fn requests_issued(&self) -> u64 {
        self.inner.requests_issued.load(Ordering::Relaxed)
    }

    /// Resolve a resource path against the configured base URL.
    ///
    /// Absolute URLs pass through unchanged; pagination links returned by
    /// the API are absolute.
    pub fn resolve(&self, uri: &str) -> String {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            uri.to_string()
        } else {
            format!(
                "{}/{}",
                self.inner.config.base_url.trim_end_matches('/'),
                uri.trim_start_matches('/')
            )
        }
    }

    /// Issue a GET request and decode the JSON response.
    ///
    /// Transient failures (transport errors, 5xx) are retried with a
    /// doubling delay. Quota exhaustion is not retried.
    pub async fn get_json(&self, uri: &str) -> Result<Value> {
        let url = self.resolve(uri);
        let mut delay = Duration::from_millis(RETRY_DELAY_MS);

        for attempt in 0..=MAX_RETRIES {
            match self.send(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if Self::is_retryable(&e) && attempt < MAX_RETRIES => {
                    warn!(
                        url = %url,
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "Retrying after transient failure"
                    );
                    sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::Request(format!(
            "Request to {} failed after {} retries",
            url, MAX_RETRIES
        )))
    }

    async fn send(&self, url: &str) -> Result<Value> {
        self.throttle().await;

        debug!(url = %url, "Sending API request");

        let response = self
            .inner
            .http
            .get(url)
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| Error::Request(format!("Request failed: {}", e)))?;
        self.inner.requests_issued.fetch_add(1, Ordering::Relaxed);

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_failure(url, status, response).await);
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Request(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Parse(format!("Failed to parse response: {}", e)))
    }

    /// Build headers with authentication.
    fn build_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "X-ELS-APIKey",
            self.inner.config.api_key.parse().unwrap(),
        );
        if let Some(token) = &self.inner.config.inst_token {
            headers.insert("X-ELS-Insttoken", token.parse().unwrap());
        }
        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        headers
    }

    /// Space out requests per the API fair-use policy.
    ///
    /// The lock is held across the sleep so concurrent callers queue
    /// rather than stampede.
    async fn throttle(&self) {
        let interval = self.inner.config.min_request_interval;
        if interval.is_zero() {
            return;
        }

        let mut last = self.inner.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < interval {
                sleep(interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn map_failure(url: &str, status: StatusCode, response: reqwest::Response) -> Error {
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                // X-ELS-Status carries the quota message, X-RateLimit-Reset
                // the reset timestamp; either is worth surfacing.
                let reset_at = response
                    .headers()
                    .get("X-ELS-Status")
                    .or_else(|| response.headers().get("X-RateLimit-Reset"))
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                Error::QuotaExceeded { reset_at }
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let text = response.text().await.unwrap_or_default();
                Error::Unauthorized(format!("API rejected credentials ({}): {}", status, text))
            }
            StatusCode::NOT_FOUND => Error::NotFound(url.to_string()),
            _ => {
                let text = response.text().await.unwrap_or_default();
                Error::Api {
                    status: status.as_u16(),
                    message: text,
                }
            }
        }
    }

    /// Check if an error is worth retrying
    fn is_retryable(error: &Error) -> bool {
        match error {
            Error::Api { status, .. } => *status >= 500,
            Error::Request(_) => true,
            _ => false,
        }
    }
}
