//! Hypothesis API client
//!
//! [`Client`] binds a token, a query and a maximum together and hands out
//! result streams over the search endpoint.
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use hypothesis_client::{Client, SearchParams};
//!
//! let params = SearchParams::new().tag("climate");
//! let client = Client::new("", params, 215)?;
//! let mut stream = client.search_all();
//! while let Some(record) = stream.next().await {
//!     println!("{}", record?.id);
//! }
//! ```

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::model::{Page, Profile, SearchResult};
use crate::pagination::{HttpPageFetcher, PaginationEngine};
use crate::query::SearchParams;
use crate::stream::ResultStream;
use tracing::debug;

/// Client for the annotation search API
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    params: SearchParams,
    max_results: Option<usize>,
    config: ClientConfig,
    search_url: String,
    profile_url: String,
}

impl Client {
    /// Create a client against the public service
    ///
    /// An empty token makes unauthenticated requests. A `max_results` of 0
    /// uses the configured default.
    pub fn new(token: impl Into<String>, params: SearchParams, max_results: usize) -> Result<Self> {
        Self::builder()
            .token(token)
            .params(params)
            .max_results(max_results)
            .build()
    }

    /// Start building a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Query this client searches with
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Caller maximum, if one was set
    pub fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check if requests carry a token
    pub fn is_authenticated(&self) -> bool {
        self.http.credentials().is_authenticated()
    }

    /// Maximum a search would deliver, before clamping to the server total
    pub fn effective_max(&self) -> usize {
        self.config
            .pagination()
            .resolve_max(self.max_results, self.params.limit)
    }

    /// Page fetcher bound to this client's search endpoint
    pub fn fetcher(&self) -> HttpPageFetcher {
        HttpPageFetcher::new(self.http.clone(), self.search_url.clone())
    }

    /// Fetch only the first page of results
    pub async fn search(&self) -> Result<Page> {
        let query = self.params.render(self.config.page_size);
        let config = RequestConfig::new().query_pairs(query.into_pairs());
        let result: SearchResult = self
            .http
            .get_json(&self.search_url, config)
            .await?;
        Page::try_from(result)
    }

    /// Stream every matching record up to the effective maximum
    ///
    /// Nothing is fetched until the returned stream is polled by the
    /// runtime; must be called from within a tokio runtime.
    pub fn search_all(&self) -> ResultStream {
        self.search_with(self.params.clone(), self.max_results)
    }

    /// Stream a different query with this client's transport
    pub fn search_with(&self, params: SearchParams, max_results: Option<usize>) -> ResultStream {
        debug!("Streaming search from {}", self.search_url);
        PaginationEngine::new(self.fetcher(), self.config.pagination()).spawn(params, max_results)
    }

    /// Fetch the profile of the token's owner
    pub async fn profile(&self) -> Result<Profile> {
        self.http
            .get_json(&self.profile_url, RequestConfig::new())
            .await
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Client`]
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    token: Option<String>,
    params: SearchParams,
    max_results: Option<usize>,
    config: Option<ClientConfig>,
}

impl ClientBuilder {
    /// API token; blank means anonymous
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Search query
    pub fn params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Caller maximum; 0 means the configured default
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max).filter(|m| *m > 0);
        self
    }

    /// Client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate the configuration and build the client
    pub fn build(self) -> Result<Client> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        self.params.validate()?;

        let credentials = self
            .token
            .map(Credentials::from_token)
            .unwrap_or_default();
        let http = HttpClient::with_credentials(config.http_config(), credentials)?;

        Ok(Client {
            search_url: config.endpoint("search")?,
            profile_url: config.endpoint("profile")?,
            http,
            params: self.params,
            max_results: self.max_results,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_defaults() {
        let client = Client::new("", SearchParams::new(), 0).unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.max_results(), None);
        assert_eq!(client.effective_max(), 400);
        assert_eq!(client.fetcher().search_url(), "https://hypothes.is/api/search");
    }

    #[test]
    fn test_effective_max() {
        let client = Client::new("tok", SearchParams::new(), 215).unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.effective_max(), 215);

        let client = Client::new("", SearchParams::new().limit(501), 500).unwrap();
        assert_eq!(client.effective_max(), 501);
    }

    #[test]
    fn test_builder_config() {
        let config = ClientConfig {
            default_max_results: 25,
            ..ClientConfig::default()
        }
        .with_api_url("http://localhost:5000/api");

        let client = Client::builder().config(config).build().unwrap();
        assert_eq!(client.effective_max(), 25);
        assert_eq!(
            client.fetcher().search_url(),
            "http://localhost:5000/api/search"
        );
        assert_eq!(client.profile_url, "http://localhost:5000/api/profile");
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        let err = Client::builder()
            .params(SearchParams::new().tag(" "))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));

        let config = ClientConfig {
            page_size: 0,
            ..ClientConfig::default()
        };
        assert!(Client::builder().config(config).build().is_err());
    }
}
