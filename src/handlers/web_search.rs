use super::format::format_results;
use super::ServerContext;
use crate::protocol::{ToolResult, WebSearchParams};
use crate::search::{AllowList, SearchRequest};

/// Handle a `web_search` tool call.
///
/// An `allowed_domains` argument replaces the configured allow-list for
/// this call only, unless nothing in it survives normalization.
pub async fn handle(params: WebSearchParams, ctx: &ServerContext) -> ToolResult {
    let allow_list = params
        .allowed_domains
        .map(AllowList::new)
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| ctx.config.allowed_domains.clone());

    let request = SearchRequest::new(params.query, allow_list, params.max_results);
    let results = ctx.search.search(&request).await;

    tracing::info!(
        query = %request.query,
        restricted = !request.allow_list.is_empty(),
        results = results.len(),
        "web_search completed"
    );

    ToolResult::text(format_results(&request.query, &results, None))
}
