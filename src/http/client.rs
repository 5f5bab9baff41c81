//! HTTP transport
//!
//! Thin wrapper over `reqwest` for the two read-only GET endpoints. It paces
//! requests, attaches credentials, and sorts failures into transport, status
//! and decode errors. Requests are never retried.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::Credentials;
use crate::error::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// User agent sent when none is configured
pub fn default_user_agent() -> String {
    format!("hypothesis-client/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Configuration
// ============================================================================

/// Transport settings
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// Client-side pacing; `None` sends as fast as the caller asks
    pub rate_limit: Option<RateLimiterConfig>,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for [`HttpClientConfig`]
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Pace requests
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable pacing
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query string of one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    /// Query parameters in send order; keys may repeat
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Append query parameters, keeping their order
    #[must_use]
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

// ============================================================================
// Client
// ============================================================================

/// Rate-limited JSON GET client
///
/// Cloning is cheap: the connection pool and the rate limiter are shared.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_headers: HashMap<String, String>,
    credentials: Credentials,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create an anonymous client
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_credentials(config, Credentials::None)
    }

    /// Create a client that sends the given credentials
    pub fn with_credentials(config: HttpClientConfig, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
            default_headers: config.default_headers,
            credentials,
        })
    }

    /// Credentials attached to every request
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// GET `url` and decode the JSON body
    ///
    /// A body that cannot be read is a transport failure; a body that does
    /// not match `T` is a decode failure.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, request: RequestConfig) -> Result<T> {
        let response = self.send(url, &request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(url, e))?;
        decode_json(&body)
    }

    async fn send(&self, url: &str, request: &RequestConfig) -> Result<Response> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(url);
        for (key, value) in &self.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        req = self.credentials.apply(req);

        let response = req.send().await.map_err(|e| Error::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("GET {} -> {}", url, status);
            return Err(Error::upstream_status(url, status.as_u16(), body));
        }

        debug!("GET {} -> {}", url, status);
        Ok(response)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("credentials", &self.credentials)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Decode a JSON body into `T`, reporting mismatches as decode errors
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
}
