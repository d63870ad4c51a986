use serde_json::Value;

use super::FormatConverter;
use crate::errors::{ConversionError, ConversionResult};
use crate::json_schema;
use crate::models::content::{ContentPart, ToolCallContent};
use crate::models::message::Message;
use crate::models::response_format::ResponseFormat;
use crate::models::role::Role;
use crate::models::tool::{FunctionKind, ToolChoice, ToolDefinition};
use crate::providers::openai::{
    OpenAiContentPart, OpenAiFunctionCall, OpenAiFunctionDefinition, OpenAiJsonSchema,
    OpenAiMessage, OpenAiMessageContent, OpenAiResponseFormat, OpenAiToolCall, OpenAiToolChoice,
    OpenAiToolChoiceMode, OpenAiToolDefinition,
};

impl FormatConverter {
    /// Convert a content part to inline hub content
    ///
    /// Tool calls and tool results are not inline content in the hub, they are carried by the
    /// message itself, so they convert to `None`.
    pub fn content_part_to_hub(&self, part: &ContentPart) -> Option<OpenAiContentPart> {
        match part {
            ContentPart::Text { text } => Some(OpenAiContentPart::Text {
                text: text.text.clone(),
            }),
            ContentPart::ToolCall { .. } | ContentPart::ToolResult { .. } => None,
        }
    }

    fn text_parts_to_hub(&self, message: &Message) -> OpenAiMessageContent {
        let parts = message
            .content
            .iter()
            .filter_map(|part| {
                let converted = self.content_part_to_hub(part);
                if converted.is_none() {
                    tracing::debug!(
                        role = ?message.role,
                        "Dropping non-text part from message content"
                    );
                }
                converted
            })
            .collect();
        OpenAiMessageContent::Parts(parts)
    }

    pub fn message_to_hub(&self, message: &Message) -> ConversionResult<OpenAiMessage> {
        match message.role {
            Role::Tool => {
                let tool_result = message.tool_result().ok_or(ConversionError::MissingToolResult)?;
                let content = match &tool_result.result {
                    Value::String(text) => text.clone(),
                    result => self.stringify(result, "tool result")?,
                };
                Ok(OpenAiMessage::Tool {
                    content: OpenAiMessageContent::Text(content),
                    tool_call_id: tool_result.tool_call_id.clone(),
                })
            }
            Role::System => Ok(OpenAiMessage::System {
                content: self.text_parts_to_hub(message),
            }),
            Role::User => Ok(OpenAiMessage::User {
                content: self.text_parts_to_hub(message),
            }),
            Role::Ai => {
                let tool_calls = message
                    .tool_calls()
                    .into_iter()
                    .map(|tool_call| self.tool_call_to_hub(tool_call))
                    .collect::<ConversionResult<Vec<_>>>()?;
                Ok(OpenAiMessage::Assistant {
                    content: Some(self.text_parts_to_hub(message)),
                    tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
                })
            }
        }
    }

    pub fn messages_to_hub(&self, messages: &[Message]) -> ConversionResult<Vec<OpenAiMessage>> {
        messages
            .iter()
            .map(|message| self.message_to_hub(message))
            .collect()
    }

    pub fn tool_call_to_hub(
        &self,
        tool_call: &ToolCallContent,
    ) -> ConversionResult<OpenAiToolCall> {
        let function = &tool_call.tool_call;
        let arguments = match function.arguments.as_str() {
            Some(arguments) => arguments.to_string(),
            None => self.stringify(&function.arguments, "tool call arguments")?,
        };
        Ok(OpenAiToolCall {
            id: tool_call.tool_call_id.clone(),
            kind: FunctionKind::Function,
            function: OpenAiFunctionCall {
                name: function.name.clone(),
                arguments,
            },
        })
    }

    pub fn tool_definition_to_hub(
        &self,
        tool: &ToolDefinition,
    ) -> ConversionResult<OpenAiToolDefinition> {
        let parameters = tool
            .schema
            .as_ref()
            .map(|schema| json_schema::compatible(&schema.json))
            .transpose()?;
        Ok(OpenAiToolDefinition {
            kind: FunctionKind::Function,
            function: OpenAiFunctionDefinition {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters,
                strict: tool.strict(),
            },
        })
    }

    pub fn tool_choice_to_hub(&self, choice: &ToolChoice) -> OpenAiToolChoice {
        match choice {
            ToolChoice::None => OpenAiToolChoice::Mode(OpenAiToolChoiceMode::None),
            ToolChoice::ZeroOrMore => OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Auto),
            ToolChoice::OneOrMore => OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Required),
            ToolChoice::SpecificFunctionTool { function_name } => {
                OpenAiToolChoice::function(function_name.clone())
            }
        }
    }

    pub fn response_format_to_hub(
        &self,
        format: &ResponseFormat,
    ) -> ConversionResult<OpenAiResponseFormat> {
        Ok(OpenAiResponseFormat::JsonSchema {
            json_schema: OpenAiJsonSchema {
                name: format.name.clone(),
                description: format.description.clone(),
                schema: json_schema::compatible(&format.schema.json)?,
                strict: format.strict(),
            },
        })
    }
}
