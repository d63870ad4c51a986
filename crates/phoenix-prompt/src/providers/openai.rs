//! The OpenAI shaped hub format
//!
//! Every conversion between Phoenix documents and a provider goes through these types.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::HubAdapter;
use crate::errors::ConversionResult;
use crate::models::tool::FunctionKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAiContentPart {
    Text { text: String },
}

/// Message content, which OpenAI accepts either as a plain string or as a list of parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAiMessageContent {
    Text(String),
    Parts(Vec<OpenAiContentPart>),
}

impl OpenAiMessageContent {
    /// The content as a list of text segments, in order
    pub fn texts(&self) -> Vec<&str> {
        match self {
            OpenAiMessageContent::Text(text) => vec![text.as_str()],
            OpenAiMessageContent::Parts(parts) => parts
                .iter()
                .map(|part| match part {
                    OpenAiContentPart::Text { text } => text.as_str(),
                })
                .collect(),
        }
    }

    /// Concatenate the content into a single string
    pub fn text(&self) -> String {
        self.texts().concat()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunctionCall {
    pub name: String,
    /// JSON encoded arguments
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiToolCall {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: FunctionKind,
    pub function: OpenAiFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum OpenAiMessage {
    #[serde(alias = "developer")]
    System { content: OpenAiMessageContent },
    User { content: OpenAiMessageContent },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<OpenAiMessageContent>,
        /// Absent rather than empty when there are no calls, some providers reject `[]`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<OpenAiToolCall>>,
    },
    Tool {
        content: OpenAiMessageContent,
        tool_call_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiToolDefinition {
    #[serde(rename = "type")]
    pub kind: FunctionKind,
    pub function: OpenAiFunctionDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAiToolChoiceMode {
    None,
    Auto,
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiFunctionName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiNamedToolChoice {
    #[serde(rename = "type")]
    pub kind: FunctionKind,
    pub function: OpenAiFunctionName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAiToolChoice {
    Mode(OpenAiToolChoiceMode),
    Named(OpenAiNamedToolChoice),
}

impl OpenAiToolChoice {
    pub fn function<S: Into<String>>(name: S) -> Self {
        OpenAiToolChoice::Named(OpenAiNamedToolChoice {
            kind: FunctionKind::Function,
            function: OpenAiFunctionName { name: name.into() },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiJsonSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAiResponseFormat {
    Text,
    JsonObject,
    JsonSchema { json_schema: OpenAiJsonSchema },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiInvocationParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<OpenAiToolChoice>,
}

/// A chat completion request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAiChatRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OpenAiToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<OpenAiResponseFormat>,
    #[serde(flatten)]
    pub parameters: OpenAiInvocationParameters,
}

/// The hub's own adapter, every conversion is the identity
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiAdapter;

impl HubAdapter for OpenAiAdapter {
    type Conversation = Vec<OpenAiMessage>;
    type ToolDefinition = OpenAiToolDefinition;
    type ToolChoice = OpenAiToolChoice;

    fn conversation_from_hub(
        &self,
        messages: &[OpenAiMessage],
    ) -> ConversionResult<Self::Conversation> {
        Ok(messages.to_vec())
    }

    fn conversation_to_hub(
        &self,
        conversation: &Self::Conversation,
    ) -> ConversionResult<Vec<OpenAiMessage>> {
        Ok(conversation.clone())
    }

    fn tool_definition_from_hub(&self, tool: &OpenAiToolDefinition) -> Self::ToolDefinition {
        tool.clone()
    }

    fn tool_definition_to_hub(&self, tool: &Self::ToolDefinition) -> OpenAiToolDefinition {
        tool.clone()
    }

    fn tool_choice_from_hub(&self, choice: &OpenAiToolChoice) -> Self::ToolChoice {
        choice.clone()
    }

    fn tool_choice_to_hub(&self, choice: &Self::ToolChoice) -> OpenAiToolChoice {
        choice.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assistant_without_tool_calls_omits_field() {
        let message = OpenAiMessage::Assistant {
            content: Some(OpenAiMessageContent::Parts(vec![OpenAiContentPart::Text {
                text: "hi".to_string(),
            }])),
            tool_calls: None,
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"role": "assistant", "content": [{"type": "text", "text": "hi"}]})
        );
    }

    #[test]
    fn test_content_accepts_string_or_parts() {
        let message: OpenAiMessage =
            serde_json::from_value(json!({"role": "user", "content": "hello"})).unwrap();
        assert_eq!(
            message,
            OpenAiMessage::User {
                content: OpenAiMessageContent::Text("hello".to_string())
            }
        );

        let content: OpenAiMessageContent = serde_json::from_value(json!([
            {"type": "text", "text": "a"},
            {"type": "text", "text": "b"}
        ]))
        .unwrap();
        assert_eq!(content.texts(), vec!["a", "b"]);
        assert_eq!(content.text(), "ab");
    }

    #[test]
    fn test_developer_role_reads_as_system() {
        let message: OpenAiMessage =
            serde_json::from_value(json!({"role": "developer", "content": "rules"})).unwrap();
        assert!(matches!(message, OpenAiMessage::System { .. }));
    }

    #[test]
    fn test_assistant_with_null_content() {
        let message: OpenAiMessage = serde_json::from_value(json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {"name": "lookup", "arguments": "{}"}
            }]
        }))
        .unwrap();

        match message {
            OpenAiMessage::Assistant {
                content,
                tool_calls,
            } => {
                assert!(content.is_none());
                assert_eq!(tool_calls.unwrap()[0].function.name, "lookup");
            }
            _ => panic!("Expected assistant message"),
        }
    }

    #[test]
    fn test_tool_choice_encoding() {
        assert_eq!(
            serde_json::to_value(OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Auto)).unwrap(),
            json!("auto")
        );
        assert_eq!(
            serde_json::to_value(OpenAiToolChoice::function("lookup")).unwrap(),
            json!({"type": "function", "function": {"name": "lookup"}})
        );
        let choice: OpenAiToolChoice = serde_json::from_value(json!("required")).unwrap();
        assert_eq!(choice, OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Required));
        assert!(serde_json::from_value::<OpenAiToolChoice>(json!("sometimes")).is_err());
    }

    #[test]
    fn test_invocation_parameters_reject_unknown_fields() {
        let result =
            serde_json::from_value::<OpenAiInvocationParameters>(json!({"temperatur": 0.5}));
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_request_flattens_parameters() {
        let request = OpenAiChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![OpenAiMessage::User {
                content: OpenAiMessageContent::Text("hi".to_string()),
            }],
            tools: None,
            parallel_tool_calls: None,
            response_format: None,
            parameters: OpenAiInvocationParameters {
                temperature: Some(0.5),
                seed: Some(7),
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0.5,
                "seed": 7
            })
        );
    }
}
