use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::json_schema::JsonSchemaObject;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseFormatKind {
    #[default]
    #[serde(rename = "response-format-json-schema-v1")]
    JsonSchemaV1,
}

/// A structured output contract requested from a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: ResponseFormatKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: JsonSchemaObject,
    #[serde(default)]
    pub extra_parameters: Map<String, Value>,
}

impl ResponseFormat {
    pub fn new<N: Into<String>>(name: N, schema: Value) -> Self {
        ResponseFormat {
            kind: ResponseFormatKind::JsonSchemaV1,
            name: name.into(),
            description: None,
            schema: JsonSchemaObject::new(schema),
            extra_parameters: Map::new(),
        }
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn strict(&self) -> Option<bool> {
        self.extra_parameters.get("strict").and_then(Value::as_bool)
    }
}
