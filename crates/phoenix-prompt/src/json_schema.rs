//! Compatibility layer for the JSON schemas attached to tools and response formats
//!
//! Phoenix only stores object schemas (draft 7). Schemas are checked here rather than fully
//! validated against the draft: the checks cover what providers reject outright.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{ConversionError, ConversionResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonSchemaKind {
    #[default]
    #[serde(rename = "json-schema-draft-7-object-schema")]
    Draft7ObjectSchema,
}

/// A stored JSON schema together with its dialect tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaObject {
    #[serde(rename = "type")]
    pub kind: JsonSchemaKind,
    pub json: Value,
}

impl JsonSchemaObject {
    pub fn new(json: Value) -> Self {
        JsonSchemaObject {
            kind: JsonSchemaKind::Draft7ObjectSchema,
            json,
        }
    }
}

/// Check that a schema is an object schema a provider will accept and return a copy of it
pub fn compatible(schema: &Value) -> ConversionResult<Value> {
    let object = schema
        .as_object()
        .ok_or_else(|| ConversionError::InvalidJsonSchema("schema must be a JSON object".into()))?;

    if let Some(kind) = object.get("type") {
        if kind != "object" {
            return Err(ConversionError::InvalidJsonSchema(format!(
                "expected an object schema but found type {}",
                kind
            )));
        }
    }

    if let Some(properties) = object.get("properties") {
        if !properties.is_object() {
            return Err(ConversionError::InvalidJsonSchema(
                "properties must be a JSON object".into(),
            ));
        }
    }

    if let Some(required) = object.get("required") {
        let all_strings = required
            .as_array()
            .is_some_and(|names| names.iter().all(Value::is_string));
        if !all_strings {
            return Err(ConversionError::InvalidJsonSchema(
                "required must be an array of property names".into(),
            ));
        }
    }

    Ok(schema.clone())
}

/// The schema of a function that takes no parameters
pub fn empty_object_schema() -> Value {
    json!({"type": "object", "properties": {}})
}
