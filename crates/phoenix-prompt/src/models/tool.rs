use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ConversionError, ConversionResult};
use crate::json_schema::JsonSchemaObject;

/// The `"function"` tag shared by tool calls and tool definitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionKind {
    #[default]
    #[serde(rename = "function")]
    Function,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolDefinitionKind {
    #[default]
    #[serde(rename = "function-tool-v1")]
    FunctionToolV1,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolsKind {
    #[default]
    #[serde(rename = "tools-v1")]
    ToolsV1,
}

/// A tool that can be offered to a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: ToolDefinitionKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A json schema of the function signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonSchemaObject>,
    /// Provider specific settings such as `strict` or `cache_control`
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra_parameters: Map<String, Value>,
}

impl ToolDefinition {
    pub fn new<N: Into<String>>(name: N) -> Self {
        ToolDefinition {
            kind: ToolDefinitionKind::FunctionToolV1,
            name: name.into(),
            description: None,
            schema: None,
            extra_parameters: Map::new(),
        }
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_schema(mut self, json: Value) -> Self {
        self.schema = Some(JsonSchemaObject::new(json));
        self
    }

    pub fn with_extra_parameter<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.extra_parameters.insert(key.into(), value);
        self
    }

    /// The OpenAI `strict` flag, when one was recorded
    pub fn strict(&self) -> Option<bool> {
        self.extra_parameters.get("strict").and_then(Value::as_bool)
    }
}

/// A policy describing whether and how a model may invoke tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToolChoice {
    None,
    ZeroOrMore,
    OneOrMore,
    SpecificFunctionTool { function_name: String },
}

/// The tools attached to a prompt version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tools {
    #[serde(rename = "type")]
    pub kind: ToolsKind,
    pub tools: Vec<ToolDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_parallel_tool_calls: Option<bool>,
}

impl Tools {
    pub fn new(tools: Vec<ToolDefinition>) -> ConversionResult<Self> {
        if tools.is_empty() {
            return Err(ConversionError::EmptyTools);
        }
        Ok(Tools {
            kind: ToolsKind::ToolsV1,
            tools,
            tool_choice: None,
            disable_parallel_tool_calls: None,
        })
    }

    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_choice_tags() {
        assert_eq!(
            serde_json::to_value(ToolChoice::ZeroOrMore).unwrap(),
            json!({"type": "zero-or-more"})
        );
        assert_eq!(
            serde_json::to_value(ToolChoice::OneOrMore).unwrap(),
            json!({"type": "one-or-more"})
        );
        let choice: ToolChoice = serde_json::from_value(json!({
            "type": "specific-function-tool",
            "function_name": "lookup"
        }))
        .unwrap();
        assert_eq!(
            choice,
            ToolChoice::SpecificFunctionTool {
                function_name: "lookup".to_string()
            }
        );
    }

    #[test]
    fn test_tool_definition_shape() {
        let tool = ToolDefinition::new("get_weather")
            .with_description("Get the weather for a location")
            .with_schema(json!({"type": "object", "properties": {}}))
            .with_extra_parameter("strict", json!(true));

        assert_eq!(
            serde_json::to_value(&tool).unwrap(),
            json!({
                "type": "function-tool-v1",
                "name": "get_weather",
                "description": "Get the weather for a location",
                "schema": {
                    "type": "json-schema-draft-7-object-schema",
                    "json": {"type": "object", "properties": {}}
                },
                "extra_parameters": {"strict": true}
            })
        );
        assert_eq!(tool.strict(), Some(true));
    }

    #[test]
    fn test_tools_require_one_tool() {
        let result = Tools::new(vec![]);
        assert!(matches!(result, Err(ConversionError::EmptyTools)));

        let tools = Tools::new(vec![ToolDefinition::new("a")])
            .unwrap()
            .with_tool_choice(ToolChoice::None);
        assert_eq!(
            serde_json::to_value(&tools).unwrap(),
            json!({
                "type": "tools-v1",
                "tools": [{"type": "function-tool-v1", "name": "a"}],
                "tool_choice": {"type": "none"}
            })
        );
    }
}
