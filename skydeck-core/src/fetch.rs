//! HTTP GET + JSON decoding with exponential-backoff retry.
//!
//! Every failure is retried: network errors, non-success statuses and
//! undecodable bodies alike. The k-th retry waits `initial_delay * 2^(k-1)`;
//! there is no jitter and no upper bound on the delay.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt::Display, future::Future, time::Duration};
use tracing::{debug, warn};

use crate::error::FetchError;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts are `max_retries + 1`.
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay_ms: u64) -> Self {
        Self { max_retries, initial_delay: Duration::from_millis(initial_delay_ms) }
    }

    /// Delay before retry number `retry` (1-based).
    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let factor = 2u128.checked_pow(retry.saturating_sub(1));
        let nanos = factor.and_then(|f| self.initial_delay.as_nanos().checked_mul(f));

        match nanos {
            Some(n) if n <= Duration::MAX.as_nanos() => {
                let secs = (n / 1_000_000_000) as u64;
                Duration::new(secs, (n % 1_000_000_000) as u32)
            }
            _ => Duration::MAX,
        }
    }
}

/// Same settings as [`RetryPolicy`], in the shape stored in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self { max_retries: DEFAULT_MAX_RETRIES, initial_delay_ms: DEFAULT_INITIAL_DELAY_MS }
    }
}

impl From<RetrySettings> for RetryPolicy {
    fn from(s: RetrySettings) -> Self {
        RetryPolicy::new(s.max_retries, s.initial_delay_ms)
    }
}

/// Run `op` until it succeeds or the retry budget is spent. `op` receives the
/// 0-based attempt number. Waiting is done with `tokio::time::sleep`, so other
/// tasks keep running during the backoff.
pub async fn retry_with_backoff<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.delay_before_retry(attempt);
                warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "request failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// GET `url` and decode the body as JSON, retrying per `policy`.
pub async fn fetch_json_with_retry(
    client: &Client,
    url: &Url,
    policy: &RetryPolicy,
) -> Result<Value, FetchError> {
    retry_with_backoff(policy, |attempt| fetch_json_once(client, url, attempt)).await
}

async fn fetch_json_once(client: &Client, url: &Url, attempt: u32) -> Result<Value, FetchError> {
    debug!(path = url.path(), attempt, "GET");

    let res = client.get(url.clone()).send().await.map_err(FetchError::Network)?;
    let status = res.status();
    let body = res.bytes().await.map_err(FetchError::Network)?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            message: error_message(&body, status.as_u16()),
        });
    }

    serde_json::from_slice(&body).map_err(FetchError::Decode)
}

/// Message from the provider's error body, or a generic one when the body is
/// not JSON or carries no message.
fn error_message(body: &[u8], status: u16) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error, status={status}"))
}
