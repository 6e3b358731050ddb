use serde::Deserialize;
use std::time::Duration;

/// Statuses worth another attempt: timeouts, throttling and gateway trouble.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Retry policy applied by [`Pipeline::send`](super::Pipeline::send).
///
/// Transport errors and [retryable statuses](is_retryable_status) are sent
/// again up to `max_retries` times, waiting `initial_delay_ms * 2^attempt`
/// between attempts, never longer than `max_delay_ms`.
///
/// # Examples
///
/// ```no_run
/// use azrest::pipeline::RetryOptions;
/// use std::time::Duration;
///
/// let options = RetryOptions { max_retries: 5, initial_delay_ms: 200, max_delay_ms: 1_000 };
/// assert_eq!(options.delay_for(0, None), Duration::from_millis(200));
/// assert_eq!(options.delay_for(4, None), Duration::from_millis(1_000));
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryOptions {
    /// Extra attempts after the first; `0` disables retrying
    pub max_retries: u32,
    /// Backoff before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Upper bound on any single wait, in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryOptions {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Delay before retry number `attempt + 1`.
    ///
    /// A server-provided `Retry-After` wins over the computed backoff; both
    /// are capped at `max_delay_ms`.
    ///
    /// # Arguments
    ///
    /// * `attempt` - Zero-based index of the attempt that just failed
    /// * `retry_after` - Parsed `Retry-After` header, if the response had one
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let cap = Duration::from_millis(self.max_delay_ms);
        let delay = match retry_after {
            Some(delay) => delay,
            None => {
                let factor = 2_u64.checked_pow(attempt).unwrap_or(u64::MAX);
                Duration::from_millis(self.initial_delay_ms.saturating_mul(factor))
            }
        };
        delay.min(cap)
    }
}

/// Parse a `Retry-After` header given in seconds. HTTP-date values are
/// ignored and fall back to the computed backoff.
pub fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
