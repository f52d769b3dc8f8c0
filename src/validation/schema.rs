// JSON Schema validation for structured request bodies.
use jsonschema::Validator;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// One reason a value failed validation, located by JSON pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A schema document the validator refused to compile
#[derive(Debug, Error)]
#[error("invalid JSON schema: {0}")]
pub struct InvalidSchema(String);

pub fn compile(schema: &Value) -> Result<Validator, InvalidSchema> {
    jsonschema::validator_for(schema).map_err(|e| InvalidSchema(e.to_string()))
}

/// Validate `value`, collecting every violation rather than stopping at the first
pub fn validate(validator: &Validator, value: &Value) -> Result<(), Vec<Violation>> {
    let violations: Vec<Violation> = validator
        .iter_errors(value)
        .map(|e| Violation::new(pointer(&e.instance_path.to_string()), e.to_string()))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// The document root has an empty pointer
fn pointer(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}
