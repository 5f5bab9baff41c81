//! Page fetching
//!
//! A fetcher executes exactly one page request. It never decides how many
//! records to keep; that is the engine's job.

use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::model::{Page, SearchResult};
use crate::query::RenderedQuery;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Executes one bounded search request
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page described by `query`
    async fn fetch_page(&self, query: &RenderedQuery) -> Result<Page>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    async fn fetch_page(&self, query: &RenderedQuery) -> Result<Page> {
        (**self).fetch_page(query).await
    }
}

/// Fetches pages from the search endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    http: HttpClient,
    search_url: String,
}

impl HttpPageFetcher {
    /// Create a fetcher for the given search endpoint
    pub fn new(http: HttpClient, search_url: impl Into<String>) -> Self {
        Self {
            http,
            search_url: search_url.into(),
        }
    }

    /// Endpoint this fetcher queries
    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, query: &RenderedQuery) -> Result<Page> {
        let config = RequestConfig::new().query_pairs(query.pairs().iter().cloned());
        let result: SearchResult = self
            .http
            .get_json(&self.search_url, config)
            .await?;
        let page = Page::try_from(result)?;

        debug!(
            "Fetched page after '{}': {} records of {} total",
            query.cursor(),
            page.len(),
            page.total
        );
        Ok(page)
    }
}
