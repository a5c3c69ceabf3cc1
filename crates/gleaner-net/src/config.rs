//! Fetch configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP fetch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,
    /// Whole-request timeout, per attempt
    pub timeout: Duration,
    /// Extra attempts after a transient failure (0 = single attempt)
    pub retries: u32,
    /// Pause before retry `n` is `retry_backoff * n`
    pub retry_backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("gleaner/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            retries: 2,
            retry_backoff: Duration::from_millis(250),
        }
    }
}

impl FetchConfig {
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::new()
    }
}

/// Builder for [`FetchConfig`]
#[derive(Debug, Default)]
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_agent(mut self, ua: &str) -> Self {
        self.config.user_agent = ua.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.config.retry_backoff = backoff;
        self
    }

    pub fn build(self) -> FetchConfig {
        self.config
    }
}
