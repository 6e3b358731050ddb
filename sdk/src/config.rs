use crate::common::RateLimiterConfig;
use crate::pipeline::RetryOptions;
use serde::Deserialize;

pub const DEFAULT_USER_AGENT: &str = concat!("azrest/", env!("CARGO_PKG_VERSION"));

/// Settings shared by every service client built on a [`Pipeline`](crate::pipeline::Pipeline).
///
/// Deserializable so applications can embed it in their own configuration:
///
/// ```toml
/// [client]
/// timeout_secs = 60
///
/// [client.retry]
/// max_retries = 5
///
/// [client.rate_limit]
/// requests_per_second = 20
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientOptions {
    pub retry: RetryOptions,
    /// Per-request timeout; `0` disables it
    pub timeout_secs: u64,
    pub rate_limit: RateLimiterConfig,
    /// Appended to the SDK's own user agent
    pub user_agent: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            retry: RetryOptions::default(),
            timeout_secs: 30,
            rate_limit: RateLimiterConfig::default(),
            user_agent: None,
        }
    }
}

impl ClientOptions {
    pub fn with_retry(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimiterConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn without_rate_limit(mut self) -> Self {
        self.rate_limit.enabled = false;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Full `User-Agent` header value.
    pub fn user_agent(&self) -> String {
        match self.user_agent.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("{DEFAULT_USER_AGENT} {extra}"),
            _ => DEFAULT_USER_AGENT.to_string(),
        }
    }
}
