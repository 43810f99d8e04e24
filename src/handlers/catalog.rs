use serde::Serialize;
use serde_json::json;

use crate::protocol::request::{GET_ALLOWED_DOMAINS, SEARCH_FTRACK_DOCS, WEB_SEARCH};
use crate::protocol::DocType;

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// The fixed set of tools this server exposes, in advertised order.
pub fn tools() -> Vec<ToolDescriptor> {
    let doc_types: Vec<&str> = DocType::ALL.iter().map(|d| d.as_str()).collect();

    vec![
        ToolDescriptor {
            name: WEB_SEARCH,
            description: "Search the web and return titles, URLs, domains and snippets, \
                          optionally restricted to a list of allowed domains",
            input_schema: json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    },
                    "allowed_domains": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Only return results from these domains or their subdomains (overrides the server default)"
                    },
                    "max_results": {
                        "type": "number",
                        "description": "Maximum number of results to return (default 10)",
                        "minimum": 1
                    }
                }
            }),
        },
        ToolDescriptor {
            name: GET_ALLOWED_DOMAINS,
            description: "List the domains web searches are restricted to by default",
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDescriptor {
            name: SEARCH_FTRACK_DOCS,
            description: "Search the ftrack documentation sites",
            input_schema: json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "What to look for in the ftrack documentation"
                    },
                    "doc_type": {
                        "type": "string",
                        "enum": doc_types,
                        "description": "Documentation area to focus on (default all)"
                    }
                }
            }),
        },
    ]
}

/// Look up a tool's input schema by name.
pub fn input_schema(name: &str) -> Option<serde_json::Value> {
    tools()
        .into_iter()
        .find(|t| t.name == name)
        .map(|t| t.input_schema)
}
