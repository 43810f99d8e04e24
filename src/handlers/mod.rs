pub mod allowed_domains;
pub mod catalog;
pub mod docs_search;
pub mod format;
pub mod web_search;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::json;

use crate::config::ServerConfig;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCall, ToolCallParams,
    ToolResult,
};
use crate::search::SearchProvider;

/// Protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const SERVER_NAME: &str = "mcp-web-search-server";

/// Everything a request handler can read. Immutable after startup.
#[derive(Clone)]
pub struct ServerContext {
    pub config: ServerConfig,
    pub search: Arc<dyn SearchProvider>,
}

impl ServerContext {
    pub fn new(config: ServerConfig, search: Arc<dyn SearchProvider>) -> Self {
        Self { config, search }
    }
}

/// Route one request by method and build its response.
///
/// Returns `None` for notifications (`notifications/*` without an id).
/// A panic inside a handler is answered with `-32603` instead of unwinding
/// into the read loop.
pub async fn dispatch(req: &JsonRpcRequest, ctx: &ServerContext) -> Option<JsonRpcResponse> {
    if req.method.starts_with("notifications/") && req.is_notification() {
        tracing::debug!(method = %req.method, "notification received");
        return None;
    }

    tracing::debug!(method = %req.method, "dispatching request");

    let routed = AssertUnwindSafe(route(req, ctx)).catch_unwind().await;

    let response = match routed {
        Ok(Ok(result)) => JsonRpcResponse::success(req.id.clone(), result),
        Err(panic) => {
            let reason = panic_message(panic.as_ref());
            tracing::error!(method = %req.method, panic = %reason, "handler panicked");
            JsonRpcResponse::error(req.id.clone(), JsonRpcError::internal_error(reason))
        }
        Ok(Err(err)) => {
            if err.code == JsonRpcError::INTERNAL_ERROR {
                tracing::error!(method = %req.method, data = ?err.data, "request failed");
            }
            JsonRpcResponse::error(req.id.clone(), err)
        }
    };
    Some(response)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

async fn route(req: &JsonRpcRequest, ctx: &ServerContext) -> Result<serde_json::Value, JsonRpcError> {
    match req.method.as_str() {
        "initialize" => {
            let params: InitializeParams = req
                .params
                .as_ref()
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default();
            if let Some(client) = &params.client_info {
                tracing::info!(
                    client = client.name.as_deref().unwrap_or("unknown"),
                    client_version = client.version.as_deref().unwrap_or("unknown"),
                    requested_protocol = params.protocol_version.as_deref().unwrap_or("unspecified"),
                    "client initializing"
                );
            }

            Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            }))
        }

        // Only reached when a client attaches an id to a notification.
        method if method.starts_with("notifications/") => Ok(json!({})),

        "ping" => Ok(json!({})),

        "tools/list" => {
            let tools = serde_json::to_value(catalog::tools()).map_err(JsonRpcError::internal_error)?;
            Ok(json!({ "tools": tools }))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}"))
                })?,
                None => {
                    return Err(JsonRpcError::invalid_params("Missing params for tools/call"));
                }
            };

            let tool_result = dispatch_tool_call(&params, ctx).await;
            serde_json::to_value(&tool_result).map_err(JsonRpcError::internal_error)
        }

        _ => Err(JsonRpcError::method_not_found(&req.method)),
    }
}

/// Decode and run one tool call. Argument problems and unknown tools come
/// back as `isError` results.
pub async fn dispatch_tool_call(params: &ToolCallParams, ctx: &ServerContext) -> ToolResult {
    let call = match ToolCall::parse(params) {
        Ok(call) => call,
        Err(err) => {
            tracing::info!(tool = %params.name, error = %err, "tool call rejected");
            return err.into();
        }
    };

    tracing::info!(tool = call.name(), "tool call");

    match call {
        ToolCall::WebSearch(p) => web_search::handle(p, ctx).await,
        ToolCall::GetAllowedDomains => allowed_domains::handle(ctx).await,
        ToolCall::SearchFtrackDocs(p) => docs_search::handle(p, ctx).await,
    }
}
