#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mcp_web_search_server::config::{SearchSettings, ServerConfig};
use mcp_web_search_server::handlers::ServerContext;
use mcp_web_search_server::search::{AllowList, SearchProvider, SearchRequest, SearchResult};

/// Provider that serves canned results and records every request it sees.
/// Filtering and truncation follow the real client.
#[derive(Default)]
pub struct StubProvider {
    pub results: Vec<SearchResult>,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl StubProvider {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StubProvider {
    async fn search(&self, request: &SearchRequest) -> Vec<SearchResult> {
        self.requests.lock().unwrap().push(request.clone());
        let mut kept = request.allow_list.filter(self.results.clone());
        kept.truncate(request.max_results);
        kept
    }
}

pub fn hit(title: &str, url: &str, snippet: &str) -> SearchResult {
    let domain = mcp_web_search_server::search::domain_of(url).unwrap();
    SearchResult {
        title: title.into(),
        url: url.into(),
        snippet: snippet.into(),
        domain,
    }
}

pub fn sample_results() -> Vec<SearchResult> {
    vec![
        hit(
            "ftrack Python API",
            "https://developer.ftrack.com/api-clients/python/",
            "Getting started with the Python API client.",
        ),
        hit("Unrelated", "https://notftrack.com/page", "Lookalike domain."),
        hit("ftrack help", "https://help.ftrack.com/en/articles/1", ""),
        hit("Rust", "https://www.rust-lang.org/", "A language empowering everyone."),
    ]
}

pub fn test_config(allowed: &[&str]) -> ServerConfig {
    ServerConfig::new(AllowList::new(allowed.iter().copied()), SearchSettings::default())
}

pub fn test_context(allowed: &[&str], provider: Arc<StubProvider>) -> ServerContext {
    ServerContext::new(test_config(allowed), provider)
}
