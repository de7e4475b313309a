use jsonschema::validator_for;
use serde_json::{json, Value};

use crate::docs::Topic;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("Instance validation failed")]
    ValidationFailed,
}

/// JSON Schema for `GetReactDocsByTopic` arguments, advertised in
/// `tools/list`.
///
/// The `enum` keyword mirrors [`Topic::ALL`], so the advertised contract can
/// never drift from the enumeration the resolver enforces.
pub fn get_docs_input_schema() -> Value {
    let topics: Vec<&str> = Topic::ALL.iter().map(|t| t.as_str()).collect();
    json!({
        "type": "object",
        "required": ["topic"],
        "additionalProperties": false,
        "properties": {
            "topic": {
                "type": "string",
                "enum": topics,
                "description": format!(
                    "The topic of React documentation to retrieve. Must be one of: {}",
                    Topic::supported()
                )
            }
        }
    })
}

/// Validate a JSON instance against a JSON Schema (draft 2020-12).
/// Returns Ok(()) if valid, Err otherwise.
pub fn validate_instance(schema: &Value, instance: &Value) -> Result<(), SchemaValidationError> {
    let validator =
        validator_for(schema).map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    if validator.is_valid(instance) {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed)
    }
}
