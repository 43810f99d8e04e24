use super::format::format_results;
use super::ServerContext;
use crate::protocol::{DocType, DocsSearchParams, ToolResult};
use crate::search::{AllowList, SearchRequest, DEFAULT_MAX_RESULTS};

/// Header label for documentation results.
pub const DOCS_CATEGORY: &str = "ftrack documentation";

/// Restricts the provider query to the documentation site.
const SITE_FILTER: &str = "site:ftrack.com";

/// Documentation hosts; replaces any configured allow-list.
pub const DOCS_DOMAINS: [&str; 4] = [
    "ftrack.com",
    "developer.ftrack.com",
    "help.ftrack.com",
    "ftrack-python-api.rtd.ftrack.com",
];

/// Handle a `search_ftrack_docs` tool call.
pub async fn handle(params: DocsSearchParams, ctx: &ServerContext) -> ToolResult {
    let request = SearchRequest::new(
        docs_query(&params.query, params.doc_type),
        AllowList::new(DOCS_DOMAINS),
        DEFAULT_MAX_RESULTS,
    );
    let results = ctx.search.search(&request).await;

    tracing::info!(
        query = %params.query,
        doc_type = %params.doc_type,
        results = results.len(),
        "search_ftrack_docs completed"
    );

    ToolResult::text(format_results(&params.query, &results, Some(DOCS_CATEGORY)))
}

/// Provider query for a docs search: site filter, user query, then the
/// keyword clause for the documentation area.
pub fn docs_query(query: &str, doc_type: DocType) -> String {
    let clause = match doc_type {
        DocType::All => "",
        DocType::Api => " API reference",
        DocType::PythonApi => " python API",
        DocType::RestApi => " REST API",
        DocType::JavascriptApi => " javascript API",
        DocType::DeveloperGuide => " developer guide",
    };
    format!("{SITE_FILTER} {query}{clause}")
}
