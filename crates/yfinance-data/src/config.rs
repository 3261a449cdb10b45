//! Configuration for the Yahoo Finance provider

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default browser user agent; Yahoo rejects requests without one
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`YahooProvider`](crate::yahoo::YahooProvider)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YahooConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl YahooConfig {
    /// Create a new configuration builder
    pub fn builder() -> YahooConfigBuilder {
        YahooConfigBuilder::default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for YahooConfig
#[derive(Debug, Default)]
pub struct YahooConfigBuilder {
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
}

impl YahooConfigBuilder {
    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the per-request timeout; zero falls back to the default
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> YahooConfig {
        let defaults = YahooConfig::default();
        YahooConfig {
            user_agent: self
                .user_agent
                .filter(|agent| !agent.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            timeout_secs: self
                .timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
        }
    }
}
