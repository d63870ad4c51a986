use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tool::FunctionKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

/// Arguments of a tool call, either already encoded as a string or as raw JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolCallArguments {
    Text(String),
    Json(Value),
}

impl ToolCallArguments {
    /// Get the arguments as a string slice if they do not need encoding
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ToolCallArguments::Text(text) => Some(text),
            ToolCallArguments::Json(Value::String(text)) => Some(text),
            ToolCallArguments::Json(_) => None,
        }
    }
}

impl From<String> for ToolCallArguments {
    fn from(text: String) -> Self {
        ToolCallArguments::Text(text)
    }
}

impl From<&str> for ToolCallArguments {
    fn from(text: &str) -> Self {
        ToolCallArguments::Text(text.to_string())
    }
}

impl From<Value> for ToolCallArguments {
    fn from(value: Value) -> Self {
        ToolCallArguments::Json(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(rename = "type", default)]
    pub kind: FunctionKind,
    pub name: String,
    pub arguments: ToolCallArguments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallContent {
    pub tool_call_id: String,
    pub tool_call: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultContent {
    /// The id of the tool call this result answers
    pub tool_call_id: String,
    pub result: Value,
}

/// One unit of a message body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: TextContent },
    ToolCall { tool_call: ToolCallContent },
    ToolResult { tool_result: ToolResultContent },
}

impl ContentPart {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentPart::Text {
            text: TextContent { text: text.into() },
        }
    }

    pub fn tool_call<I, N, A>(tool_call_id: I, name: N, arguments: A) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        A: Into<ToolCallArguments>,
    {
        ContentPart::ToolCall {
            tool_call: ToolCallContent {
                tool_call_id: tool_call_id.into(),
                tool_call: FunctionCall {
                    kind: FunctionKind::Function,
                    name: name.into(),
                    arguments: arguments.into(),
                },
            },
        }
    }

    pub fn tool_result<I: Into<String>>(tool_call_id: I, result: Value) -> Self {
        ContentPart::ToolResult {
            tool_result: ToolResultContent {
                tool_call_id: tool_call_id.into(),
                result,
            },
        }
    }

    /// Get the text if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(&text.text),
            _ => None,
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCallContent> {
        match self {
            ContentPart::ToolCall { tool_call } => Some(tool_call),
            _ => None,
        }
    }

    pub fn as_tool_result(&self) -> Option<&ToolResultContent> {
        match self {
            ContentPart::ToolResult { tool_result } => Some(tool_result),
            _ => None,
        }
    }
}
