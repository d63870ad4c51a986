use serde_json::Value;

use super::FormatConverter;
use crate::errors::{ConversionError, ConversionResult};
use crate::json_schema;
use crate::models::content::ContentPart;
use crate::models::message::Message;
use crate::models::response_format::ResponseFormat;
use crate::models::tool::{ToolChoice, ToolDefinition};
use crate::providers::openai::{
    OpenAiMessage, OpenAiMessageContent, OpenAiResponseFormat, OpenAiToolCall, OpenAiToolChoice,
    OpenAiToolChoiceMode, OpenAiToolDefinition,
};

fn with_texts(message: Message, content: &OpenAiMessageContent) -> Message {
    content
        .texts()
        .into_iter()
        .fold(message, |message, text| message.with_text(text))
}

impl FormatConverter {
    /// Convert a hub message back to a Phoenix message
    ///
    /// Tool results are kept as the string the hub carried, a result that happens to look like
    /// JSON is not decoded.
    pub fn message_from_hub(&self, message: &OpenAiMessage) -> Message {
        match message {
            OpenAiMessage::System { content } => with_texts(Message::system(), content),
            OpenAiMessage::User { content } => with_texts(Message::user(), content),
            OpenAiMessage::Assistant {
                content,
                tool_calls,
            } => {
                let message = match content {
                    Some(content) => with_texts(Message::ai(), content),
                    None => Message::ai(),
                };
                tool_calls
                    .iter()
                    .flatten()
                    .fold(message, |message, tool_call| {
                        message.with_content(self.tool_call_from_hub(tool_call))
                    })
            }
            OpenAiMessage::Tool {
                content,
                tool_call_id,
            } => Message::tool()
                .with_tool_result(tool_call_id.clone(), Value::String(content.text())),
        }
    }

    pub fn messages_from_hub(&self, messages: &[OpenAiMessage]) -> Vec<Message> {
        messages
            .iter()
            .map(|message| self.message_from_hub(message))
            .collect()
    }

    pub fn tool_call_from_hub(&self, tool_call: &OpenAiToolCall) -> ContentPart {
        ContentPart::tool_call(
            tool_call.id.clone(),
            tool_call.function.name.clone(),
            tool_call.function.arguments.clone(),
        )
    }

    pub fn tool_definition_from_hub(
        &self,
        tool: &OpenAiToolDefinition,
    ) -> ConversionResult<ToolDefinition> {
        let function = &tool.function;
        let mut definition = ToolDefinition::new(function.name.clone());
        definition.description = function.description.clone();
        if let Some(parameters) = &function.parameters {
            definition = definition.with_schema(json_schema::compatible(parameters)?);
        }
        if let Some(strict) = function.strict {
            definition = definition.with_extra_parameter("strict", Value::Bool(strict));
        }
        Ok(definition)
    }

    pub fn tool_choice_from_hub(&self, choice: &OpenAiToolChoice) -> ToolChoice {
        match choice {
            OpenAiToolChoice::Mode(OpenAiToolChoiceMode::None) => ToolChoice::None,
            OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Auto) => ToolChoice::ZeroOrMore,
            OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Required) => ToolChoice::OneOrMore,
            OpenAiToolChoice::Named(named) => ToolChoice::SpecificFunctionTool {
                function_name: named.function.name.clone(),
            },
        }
    }

    /// Only json schema response formats can be stored
    pub fn response_format_from_hub(
        &self,
        format: &OpenAiResponseFormat,
    ) -> ConversionResult<ResponseFormat> {
        match format {
            OpenAiResponseFormat::JsonSchema { json_schema } => {
                let mut converted = ResponseFormat::new(
                    json_schema.name.clone(),
                    json_schema::compatible(&json_schema.schema)?,
                );
                converted.description = json_schema.description.clone();
                if let Some(strict) = json_schema.strict {
                    converted
                        .extra_parameters
                        .insert("strict".to_string(), Value::Bool(strict));
                }
                Ok(converted)
            }
            OpenAiResponseFormat::Text | OpenAiResponseFormat::JsonObject => {
                Err(ConversionError::UnsupportedFeature {
                    provider: "openai".to_string(),
                    feature: "response formats other than json_schema",
                })
            }
        }
    }
}
