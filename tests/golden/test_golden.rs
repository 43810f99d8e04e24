//! Golden tests: a recorded results page goes through the real client,
//! extractor, filter and formatter, and the rendered text is compared
//! byte-for-byte with a checked-in expectation.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use mcp_web_search_server::config::{SearchSettings, ServerConfig};
use mcp_web_search_server::search::{AllowList, DuckDuckGoClient};
use mcp_web_search_server::server::McpServer;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture missing")
}

fn read_expected(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden/expected")
        .join(name);
    fs::read_to_string(path)
        .expect("expected file missing")
        .trim_end()
        .to_string()
}

async fn server_for(mock: &MockServer, allowed: &[&str]) -> McpServer {
    let settings = SearchSettings {
        endpoint: Url::parse(&format!("{}/lite/", mock.uri())).unwrap(),
        ..SearchSettings::default()
    };
    let client = DuckDuckGoClient::new(&settings).unwrap();
    let config = ServerConfig::new(AllowList::new(allowed.iter().copied()), settings);
    McpServer::with_provider(config, Arc::new(client))
}

async fn call_tool(server: &McpServer, name: &str, arguments: serde_json::Value) -> String {
    let line = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
    .to_string();

    let response = server.handle_line(line.as_bytes()).await.unwrap();
    let result = response.result.unwrap();
    result["content"][0]["text"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn golden_web_search_ftrack_api() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .and(query_param("q", "ftrack api"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(fixture("lite_results.html"))
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .mount(&mock)
        .await;

    let server = server_for(&mock, &["ftrack.com"]).await;
    let text = call_tool(&server, "web_search", json!({ "query": "ftrack api" })).await;

    assert_eq!(text.trim_end(), read_expected("web_search_ftrack_api.txt"));
}

#[tokio::test]
async fn golden_output_is_stable_across_runs() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lite/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture("lite_results.html")))
        .mount(&mock)
        .await;

    let server = server_for(&mock, &["ftrack.com"]).await;
    let first = call_tool(&server, "web_search", json!({ "query": "ftrack api" })).await;
    let second = call_tool(&server, "web_search", json!({ "query": "ftrack api" })).await;

    assert_eq!(first, second);
}
