//! The advertised tool schemas are valid JSON Schema and agree with the
//! argument decoder.

use mcp_web_search_server::handlers::catalog;
use mcp_web_search_server::schema::{validate_tool_arguments, validate_value, SchemaValidationError};
use serde_json::json;

#[test]
fn every_tool_schema_compiles() {
    for tool in catalog::tools() {
        assert!(
            jsonschema::validator_for(&tool.input_schema).is_ok(),
            "schema for {} does not compile",
            tool.name
        );
    }
}

#[test]
fn web_search_arguments() {
    validate_tool_arguments(
        "web_search",
        &json!({ "query": "rust", "allowed_domains": ["docs.rs"], "max_results": 5 }),
    )
    .expect("valid arguments rejected");

    assert!(validate_tool_arguments("web_search", &json!({})).is_err());
    assert!(validate_tool_arguments("web_search", &json!({ "query": "x", "max_results": 0 })).is_err());
    assert!(validate_tool_arguments("web_search", &json!({ "query": "x", "allowed_domains": "docs.rs" })).is_err());
}

#[test]
fn docs_search_arguments() {
    validate_tool_arguments("search_ftrack_docs", &json!({ "query": "x", "doc_type": "rest-api" }))
        .expect("valid arguments rejected");

    assert!(validate_tool_arguments("search_ftrack_docs", &json!({ "query": "x", "doc_type": "cookbook" })).is_err());
}

#[test]
fn get_allowed_domains_takes_no_arguments() {
    validate_tool_arguments("get_allowed_domains", &json!({})).expect("empty arguments rejected");
}

#[test]
fn unknown_tool_has_no_schema() {
    assert!(matches!(
        validate_tool_arguments("nope", &json!({})),
        Err(SchemaValidationError::SchemaCompile(_))
    ));
}

#[test]
fn schema_harness_validates_instance() {
    let schema = json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["content"],
        "properties": {
            "content": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["type", "text"],
                    "properties": {
                        "type": { "const": "text" },
                        "text": { "type": "string" }
                    }
                }
            },
            "isError": { "type": "boolean" }
        }
    });

    let result = mcp_web_search_server::protocol::ToolResult::error("Query parameter is required");
    let instance = serde_json::to_value(&result).unwrap();

    validate_value(&schema, &instance).expect("tool result does not match schema");
    assert_eq!(instance["isError"], true);
}
