//! Client configuration
//!
//! Settings for the API endpoint, the transport and the pagination engine,
//! loadable from a YAML or JSON file. Every field has a default, so an empty
//! file is a valid configuration.

use crate::error::{Error, Result};
use crate::http::{default_user_agent, HttpClientConfig, RateLimiterConfig};
use crate::pagination::{
    PaginationConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_MAX_RESULTS, DEFAULT_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Public Hypothesis API root
pub const DEFAULT_API_URL: &str = "https://hypothes.is/api/";

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for [`crate::Client`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root; `search` and `profile` are resolved against it
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Records requested per page, at most the service ceiling of 200
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum delivered when the caller sets none
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// Records buffered between producer and consumer
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Client-side rate limit; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            page_size: default_page_size(),
            default_max_results: default_max_results(),
            channel_capacity: default_channel_capacity(),
            rate_limit: default_rate_limit(),
        }
    }
}

impl ClientConfig {
    /// Load a config file; `.json` files are parsed as JSON, anything else
    /// as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => Self::from_yaml(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Point at a different API root
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > DEFAULT_PAGE_SIZE {
            return Err(Error::invalid_value(
                "page_size",
                format!("must be between 1 and {DEFAULT_PAGE_SIZE}"),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(Error::invalid_value(
                "channel_capacity",
                "must be greater than 0",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be greater than 0",
                ));
            }
        }
        self.api_root()?;
        Ok(())
    }

    /// Absolute URL of an endpoint under the API root
    pub fn endpoint(&self, path: &str) -> Result<String> {
        Ok(self.api_root()?.join(path.trim_start_matches('/'))?.to_string())
    }

    /// Transport settings
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(self.user_agent.clone())
            .header("Accept", "application/json");

        match self.rate_limit.clone() {
            Some(limit) => builder.rate_limit(limit),
            None => builder.no_rate_limit(),
        }
        .build()
    }

    /// Engine settings
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig::new()
            .with_page_size(self.page_size)
            .with_default_max_results(self.default_max_results)
            .with_channel_capacity(self.channel_capacity)
    }

    fn api_root(&self) -> Result<Url> {
        // Without a trailing slash `join` would replace the last segment
        let mut root = Url::parse(&self.api_url)?;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(root)
    }
}
