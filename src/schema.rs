use jsonschema::validator_for;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("Instance validation failed: {0}")]
    ValidationFailed(String),
}

/// Validate a JSON value against a JSON Schema (draft 2020-12 unless the
/// schema says otherwise). The first violation is reported.
pub fn validate_value(schema: &Value, instance: &Value) -> Result<(), SchemaValidationError> {
    let validator = validator_for(schema)
        .map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    let first_error = validator.iter_errors(instance).next().map(|err| err.to_string());
    match first_error {
        None => Ok(()),
        Some(err) => Err(SchemaValidationError::ValidationFailed(err)),
    }
}

/// Check tool arguments against a tool's advertised input schema.
pub fn validate_tool_arguments(tool: &str, arguments: &Value) -> Result<(), SchemaValidationError> {
    let schema = crate::handlers::catalog::input_schema(tool)
        .ok_or_else(|| SchemaValidationError::SchemaCompile(format!("no schema for tool {tool}")))?;
    validate_value(&schema, arguments)
}
