//! DuckDuckGo lite backend.
//!
//! Scrapes the keyless HTML results page. See `extract` for the markup
//! assumptions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::extract::extract_results;
use super::{SearchProvider, SearchRequest, SearchResult};
use crate::config::SearchSettings;

/// Raw hits fetched per requested result, to leave room for filtering.
const OVERFETCH_FACTOR: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search provider returned HTTP {0}")]
    Status(StatusCode),
}

/// Search client for the DuckDuckGo lite endpoint.
pub struct DuckDuckGoClient {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoClient {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(SearchError::ClientBuild)?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.to_string(),
        })
    }

    async fn fetch_page(&self, query: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        Ok(response.text().await?)
    }

    async fn try_search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        let html = self.fetch_page(&request.query).await?;

        let raw_limit = request.max_results.saturating_mul(OVERFETCH_FACTOR);
        let raw = extract_results(&html, raw_limit);
        let raw_count = raw.len();

        let mut results = request.allow_list.filter(raw);
        results.truncate(request.max_results);

        tracing::debug!(
            query = %request.query,
            raw = raw_count,
            kept = results.len(),
            "search page extracted"
        );
        Ok(results)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn search(&self, request: &SearchRequest) -> Vec<SearchResult> {
        if request.max_results == 0 {
            return Vec::new();
        }

        match self.try_search(request).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(query = %request.query, error = %e, "search failed");
                Vec::new()
            }
        }
    }
}
