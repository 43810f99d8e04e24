//! Web search: the provider seam, the DuckDuckGo lite client, result
//! extraction, and domain allow-list filtering.

pub mod duckduckgo;
pub mod extract;
pub mod filter;

use async_trait::async_trait;
use serde::Serialize;

pub use duckduckgo::DuckDuckGoClient;
pub use filter::{domain_of, filter_results, is_allowed, AllowList};

/// Default number of results returned to the caller.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// A single search call. `allow_list` is already resolved: either the
/// per-call override or the process default.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub allow_list: AllowList,
    pub max_results: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, allow_list: AllowList, max_results: usize) -> Self {
        Self {
            query: query.into(),
            allow_list,
            max_results,
        }
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub domain: String,
}

/// Source of search results.
///
/// Implementations never fail: any fetch or parse problem is logged and
/// yields an empty list, so "no results" and "search unavailable" look the
/// same to callers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Vec<SearchResult>;
}
