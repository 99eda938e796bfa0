//! HTTP transport with two layers of retry.
//!
//! Pages are fetched through a reusable, pooled `reqwest` client that sends a
//! browser-like header set. Failures are retried at two levels:
//!
//! - [`HttpFetcher`] retries transient status codes (429, 500, 502, 503, 504)
//!   up to [`StatusRetry::total`] attempts with linear backoff.
//! - [`RetryFetch`] wraps any [`FetchAsync`] implementation and retries every
//!   failure with exponential backoff plus jitter.
//!
//! # Retry Strategy
//!
//! The delay after failed attempt `n` (counting from 0) of the outer loop is:
//! ```text
//! delay = base_delay * 2^n + random_jitter(0..1s)
//! ```
//! Once every attempt has failed the caller gets `None` instead of an error,
//! so one broken source never aborts a batch.

use crate::error::FetchError;
use rand::{Rng, rng};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

/// Per-request timeout used when the caller does not pass one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Status codes retried by the connection-level policy.
pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Trait for fetching a page body over the network.
///
/// Implemented by the real HTTP client and by the [`RetryFetch`] decorator;
/// tests provide their own stubs.
pub trait FetchAsync {
    /// Fetch `url` and return its body as text.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

/// Connection-level retry policy for transient status codes.
#[derive(Debug, Clone)]
pub struct StatusRetry {
    /// Maximum number of requests for one fetch, including the first.
    pub total: u32,
    /// Delay unit; the wait before request `n + 1` is `backoff_factor * n`.
    pub backoff_factor: Duration,
}

impl Default for StatusRetry {
    fn default() -> Self {
        StatusRetry {
            total: 3,
            backoff_factor: Duration::from_secs(1),
        }
    }
}

impl StatusRetry {
    pub fn is_retryable(&self, status: StatusCode) -> bool {
        RETRY_STATUSES.contains(&status.as_u16())
    }

    /// Wait before the request that follows attempt `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff_factor * attempt
    }
}

/// The header set sent with every request.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

/// HTTP client with a reusable connection pool.
///
/// `reqwest::Client` keeps its pool behind an `Arc`, so one fetcher can be
/// shared by sequential and concurrent callers alike.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    status_retry: StatusRetry,
}

impl HttpFetcher {
    pub fn new(status_retry: StatusRetry) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .build()
            .map_err(FetchError::Client)?;
        Ok(HttpFetcher {
            client,
            status_retry,
        })
    }
}

impl FetchAsync for HttpFetcher {
    #[instrument(level = "debug", skip(self, timeout))]
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let total = self.status_retry.total.max(1);
        let mut attempt = 1u32;

        loop {
            let response = self
                .client
                .get(url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.to_string(),
                    source,
                })?;

            let status = response.status();
            if self.status_retry.is_retryable(status) && attempt < total {
                let delay = self.status_retry.delay(attempt);
                debug!(attempt, total, status = status.as_u16(), ?delay, "Retryable status; backing off");
                sleep(delay).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            return response.text().await.map_err(|source| FetchError::Body {
                url: url.to_string(),
                source,
            });
        }
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchAsync`] implementation.
pub struct RetryFetch<T> {
    /// The underlying fetcher to wrap.
    inner: T,
    /// Total number of attempts before giving up.
    max_attempts: u32,
    /// Delay after the first failure; doubles with each attempt.
    base_delay: Duration,
    /// Upper bound (exclusive) of the random delay added to each backoff.
    jitter: Duration,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    /// Create a new retry wrapper around an existing [`FetchAsync`] implementation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let http = HttpFetcher::new(StatusRetry::default())?;
    /// let fetcher = RetryFetch::new(http, 3, Duration::from_secs(1));
    /// ```
    pub fn new(inner: T, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            base_delay,
            jitter: Duration::from_secs(1),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Deterministic part of the wait after failed attempt `attempt` (0-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(31))
    }

    fn random_jitter(&self) -> Duration {
        self.jitter.mul_f64(rng().random_range(0.0..1.0))
    }

    /// Fetch `url`, collapsing exhaustion into `None`.
    pub async fn fetch_document(&self, url: &str, timeout: Duration) -> Option<String> {
        self.fetch(url, timeout).await.ok()
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("jitter", &self.jitter)
            .finish()
    }
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync,
{
    #[instrument(level = "info", skip(self, timeout))]
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let total_t0 = Instant::now();
        let mut attempt = 0u32;

        loop {
            match self.inner.fetch(url, timeout).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        max = self.max_attempts,
                        error = %e,
                        "Request attempt failed"
                    );

                    if attempt + 1 >= self.max_attempts {
                        error!(
                            attempts = self.max_attempts,
                            elapsed_ms_total = total_t0.elapsed().as_millis(),
                            "All retry attempts failed"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff_delay(attempt) + self.random_jitter();
                    debug!(?delay, "Backing off");
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
