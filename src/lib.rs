//! MCP server for keyless web search.
//!
//! Exposes `web_search`, `get_allowed_domains`, and `search_ftrack_docs`
//! tools over JSON-RPC 2.0 stdio transport. Searches scrape the DuckDuckGo
//! lite results page and can be restricted to an allow-list of domains.

pub mod config;
pub mod handlers;
pub mod logging;
pub mod protocol;
pub mod search;
pub mod server;

pub mod schema;
