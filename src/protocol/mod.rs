pub mod request;
pub mod response;

pub use request::{
    ClientInfo, DocType, DocsSearchParams, InitializeParams, JsonRpcRequest, RpcId, ToolArgumentError,
    ToolCall, ToolCallParams, WebSearchParams,
};
pub use response::{JsonRpcError, JsonRpcResponse, ToolResult, ToolResultContent};
