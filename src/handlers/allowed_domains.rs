use super::format::format_allow_list;
use super::ServerContext;
use crate::protocol::ToolResult;

/// Handle a `get_allowed_domains` tool call.
pub async fn handle(ctx: &ServerContext) -> ToolResult {
    ToolResult::text(format_allow_list(&ctx.config.allowed_domains))
}
