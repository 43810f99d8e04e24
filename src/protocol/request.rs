use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::search::DEFAULT_MAX_RESULTS;

/// JSON-RPC 2.0 ID. Echoed back verbatim; numbers and strings are the
/// common cases, anything else is carried opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
    Other(serde_json::Value),
}

/// One decoded input line. `params` stays raw until a handler claims it.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<RpcId>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    pub fn new(id: Option<RpcId>, method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            method: method.into(),
            params,
        }
    }

    /// True when the request carries no id and therefore expects no reply.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Best-effort recovery of the id from a line that did not decode as a
    /// request.
    pub fn salvage_id(raw: &str) -> Option<RpcId> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        let id = value.get("id")?;
        if id.is_null() {
            return None;
        }
        serde_json::from_value(id.clone()).ok()
    }
}

/// Handshake fields a client may send with `initialize`. All optional; only
/// logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Name and version a client reports about itself.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Tool name plus its raw `arguments` object.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

// Typed tool arguments

pub const WEB_SEARCH: &str = "web_search";
pub const GET_ALLOWED_DOMAINS: &str = "get_allowed_domains";
pub const SEARCH_FTRACK_DOCS: &str = "search_ftrack_docs";

/// A decoded and validated `tools/call`.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    WebSearch(WebSearchParams),
    GetAllowedDomains,
    SearchFtrackDocs(DocsSearchParams),
}

/// Validated arguments for `web_search`.
#[derive(Debug, Clone, PartialEq)]
pub struct WebSearchParams {
    pub query: String,
    /// Per-call override of the configured allow-list.
    pub allowed_domains: Option<Vec<String>>,
    pub max_results: usize,
}

/// Validated arguments for `search_ftrack_docs`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocsSearchParams {
    pub query: String,
    pub doc_type: DocType,
}

/// Documentation area to focus a docs search on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocType {
    #[default]
    All,
    Api,
    PythonApi,
    RestApi,
    JavascriptApi,
    DeveloperGuide,
}

impl DocType {
    pub const ALL: [DocType; 6] = [
        DocType::All,
        DocType::Api,
        DocType::PythonApi,
        DocType::RestApi,
        DocType::JavascriptApi,
        DocType::DeveloperGuide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Api => "api",
            Self::PythonApi => "python-api",
            Self::RestApi => "rest-api",
            Self::JavascriptApi => "javascript-api",
            Self::DeveloperGuide => "developer-guide",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = ToolArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ToolArgumentError::InvalidDocType(s.to_string()))
    }
}

/// Tool-tier failure: reported to the caller as an `isError` tool result.
#[derive(Debug, thiserror::Error)]
pub enum ToolArgumentError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Query parameter is required")]
    MissingQuery,
    #[error("max_results must be a positive integer")]
    InvalidMaxResults,
    #[error(
        "Invalid doc_type '{0}': expected one of all, api, python-api, rest-api, javascript-api, developer-guide"
    )]
    InvalidDocType(String),
    #[error("Invalid arguments for {tool}: {source}")]
    Malformed {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RawWebSearchArgs {
    query: Option<String>,
    allowed_domains: Option<Vec<String>>,
    max_results: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDocsSearchArgs {
    query: Option<String>,
    doc_type: Option<String>,
}

impl ToolCall {
    /// Decode a `tools/call` into a typed tool invocation.
    pub fn parse(params: &ToolCallParams) -> Result<Self, ToolArgumentError> {
        match params.name.as_str() {
            WEB_SEARCH => {
                let raw: RawWebSearchArgs = decode_arguments(WEB_SEARCH, &params.arguments)?;
                let query = require_query(raw.query)?;
                let max_results = match raw.max_results {
                    None => DEFAULT_MAX_RESULTS,
                    Some(n) if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => n as usize,
                    Some(_) => return Err(ToolArgumentError::InvalidMaxResults),
                };
                Ok(Self::WebSearch(WebSearchParams {
                    query,
                    allowed_domains: raw.allowed_domains,
                    max_results,
                }))
            }

            GET_ALLOWED_DOMAINS => Ok(Self::GetAllowedDomains),

            SEARCH_FTRACK_DOCS => {
                let raw: RawDocsSearchArgs = decode_arguments(SEARCH_FTRACK_DOCS, &params.arguments)?;
                let query = require_query(raw.query)?;
                let doc_type = match raw.doc_type {
                    Some(s) => s.parse()?,
                    None => DocType::All,
                };
                Ok(Self::SearchFtrackDocs(DocsSearchParams { query, doc_type }))
            }

            other => Err(ToolArgumentError::UnknownTool(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::WebSearch(_) => WEB_SEARCH,
            Self::GetAllowedDomains => GET_ALLOWED_DOMAINS,
            Self::SearchFtrackDocs(_) => SEARCH_FTRACK_DOCS,
        }
    }
}

fn decode_arguments<T>(
    tool: &'static str,
    arguments: &Option<serde_json::Value>,
) -> Result<T, ToolArgumentError>
where
    T: Default + serde::de::DeserializeOwned,
{
    match arguments {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|source| ToolArgumentError::Malformed { tool, source }),
    }
}

fn require_query(query: Option<String>) -> Result<String, ToolArgumentError> {
    match query {
        Some(q) if !q.trim().is_empty() => Ok(q.trim().to_string()),
        _ => Err(ToolArgumentError::MissingQuery),
    }
}
