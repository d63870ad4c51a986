use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::base::HubAdapter;
use super::openai::{
    OpenAiContentPart, OpenAiFunctionCall, OpenAiFunctionDefinition, OpenAiMessage,
    OpenAiMessageContent, OpenAiToolCall, OpenAiToolChoice, OpenAiToolChoiceMode,
    OpenAiToolDefinition,
};
use crate::errors::{ConversionError, ConversionResult};
use crate::json_schema::empty_object_schema;
use crate::models::tool::FunctionKind;

/// Anthropic requires `max_tokens`, this is used when a prompt does not set one
pub const DEFAULT_MAX_TOKENS: u64 = 1024;

const PROVIDER: &str = "anthropic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnthropicRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnthropicMessageContent {
    Text(String),
    Blocks(Vec<AnthropicContentBlock>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: AnthropicRole,
    pub content: AnthropicMessageContent,
}

impl AnthropicMessage {
    /// The blocks of a user message made only of tool results, which later results can join
    fn tool_result_blocks_mut(&mut self) -> Option<&mut Vec<AnthropicContentBlock>> {
        match (&self.role, &mut self.content) {
            (AnthropicRole::User, AnthropicMessageContent::Blocks(blocks))
                if !blocks.is_empty()
                    && blocks
                        .iter()
                        .all(|block| matches!(block, AnthropicContentBlock::ToolResult { .. })) =>
            {
                Some(blocks)
            }
            _ => None,
        }
    }
}

/// Anthropic keeps the system prompt outside of the message list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnthropicConversation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicCacheControl {
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input_schema: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<AnthropicCacheControl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicToolChoice {
    Auto,
    Any,
    Tool { name: String },
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicInvocationParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<AnthropicToolChoice>,
}

/// A messages API request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<AnthropicMessage>,
    pub max_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AnthropicToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<AnthropicToolChoice>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

fn parse_arguments(tool_call: &OpenAiToolCall) -> ConversionResult<Value> {
    let arguments = tool_call.function.arguments.trim();
    if arguments.is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(arguments).map_err(|e| ConversionError::InvalidToolArguments {
        id: tool_call.id.clone(),
        message: e.to_string(),
    })
}

fn unsupported(feature: &'static str) -> ConversionError {
    ConversionError::UnsupportedFeature {
        provider: PROVIDER.to_string(),
        feature,
    }
}

/// Anthropic rejects messages whose content is an empty block list
fn push_unless_empty(
    converted: &mut Vec<AnthropicMessage>,
    role: AnthropicRole,
    content: AnthropicMessageContent,
) {
    if matches!(&content, AnthropicMessageContent::Blocks(blocks) if blocks.is_empty()) {
        tracing::debug!(?role, "Skipping message with no Anthropic content");
        return;
    }
    converted.push(AnthropicMessage { role, content });
}

impl HubAdapter for AnthropicAdapter {
    type Conversation = AnthropicConversation;
    type ToolDefinition = AnthropicToolDefinition;
    type ToolChoice = AnthropicToolChoice;

    fn conversation_from_hub(
        &self,
        messages: &[OpenAiMessage],
    ) -> ConversionResult<Self::Conversation> {
        let mut system = Vec::new();
        let mut converted: Vec<AnthropicMessage> = Vec::new();

        for message in messages {
            match message {
                OpenAiMessage::System { content } => system.push(content.text()),
                OpenAiMessage::User { content } => {
                    let content = match content {
                        OpenAiMessageContent::Text(text) => {
                            AnthropicMessageContent::Text(text.clone())
                        }
                        OpenAiMessageContent::Parts(_) => AnthropicMessageContent::Blocks(
                            content
                                .texts()
                                .into_iter()
                                .map(|text| AnthropicContentBlock::Text {
                                    text: text.to_string(),
                                })
                                .collect(),
                        ),
                    };
                    push_unless_empty(&mut converted, AnthropicRole::User, content);
                }
                OpenAiMessage::Assistant {
                    content,
                    tool_calls,
                } => {
                    let content = match (content, tool_calls) {
                        (Some(OpenAiMessageContent::Text(text)), None) => {
                            AnthropicMessageContent::Text(text.clone())
                        }
                        _ => {
                            let mut blocks: Vec<AnthropicContentBlock> = content
                                .iter()
                                .flat_map(|content| content.texts())
                                .filter(|text| !text.is_empty())
                                .map(|text| AnthropicContentBlock::Text {
                                    text: text.to_string(),
                                })
                                .collect();
                            for tool_call in tool_calls.iter().flatten() {
                                blocks.push(AnthropicContentBlock::ToolUse {
                                    id: tool_call.id.clone(),
                                    name: tool_call.function.name.clone(),
                                    input: parse_arguments(tool_call)?,
                                });
                            }
                            AnthropicMessageContent::Blocks(blocks)
                        }
                    };
                    push_unless_empty(&mut converted, AnthropicRole::Assistant, content);
                }
                OpenAiMessage::Tool {
                    content,
                    tool_call_id,
                } => {
                    let block = AnthropicContentBlock::ToolResult {
                        tool_use_id: tool_call_id.clone(),
                        content: content.text(),
                    };
                    // consecutive tool results are answered together in one user turn
                    match converted
                        .last_mut()
                        .and_then(AnthropicMessage::tool_result_blocks_mut)
                    {
                        Some(blocks) => blocks.push(block),
                        None => converted.push(AnthropicMessage {
                            role: AnthropicRole::User,
                            content: AnthropicMessageContent::Blocks(vec![block]),
                        }),
                    }
                }
            }
        }

        Ok(AnthropicConversation {
            system: (!system.is_empty()).then(|| system.join("\n")),
            messages: converted,
        })
    }

    fn conversation_to_hub(
        &self,
        conversation: &Self::Conversation,
    ) -> ConversionResult<Vec<OpenAiMessage>> {
        let mut messages = Vec::new();

        if let Some(system) = &conversation.system {
            messages.push(OpenAiMessage::System {
                content: OpenAiMessageContent::Text(system.clone()),
            });
        }

        for message in &conversation.messages {
            let blocks = match &message.content {
                AnthropicMessageContent::Text(text) => {
                    let content = OpenAiMessageContent::Text(text.clone());
                    messages.push(match message.role {
                        AnthropicRole::User => OpenAiMessage::User { content },
                        AnthropicRole::Assistant => OpenAiMessage::Assistant {
                            content: Some(content),
                            tool_calls: None,
                        },
                    });
                    continue;
                }
                AnthropicMessageContent::Blocks(blocks) => blocks,
            };

            let mut parts = Vec::new();
            let mut tool_calls = Vec::new();
            for block in blocks {
                match (message.role, block) {
                    (_, AnthropicContentBlock::Text { text }) => {
                        parts.push(OpenAiContentPart::Text { text: text.clone() })
                    }
                    (
                        AnthropicRole::User,
                        AnthropicContentBlock::ToolResult {
                            tool_use_id,
                            content,
                        },
                    ) => {
                        // text written before the result stays ahead of it
                        if !parts.is_empty() {
                            messages.push(OpenAiMessage::User {
                                content: OpenAiMessageContent::Parts(std::mem::take(&mut parts)),
                            });
                        }
                        messages.push(OpenAiMessage::Tool {
                            content: OpenAiMessageContent::Text(content.clone()),
                            tool_call_id: tool_use_id.clone(),
                        })
                    }
                    (
                        AnthropicRole::Assistant,
                        AnthropicContentBlock::ToolUse { id, name, input },
                    ) => {
                        tool_calls.push(OpenAiToolCall {
                            id: id.clone(),
                            kind: FunctionKind::Function,
                            function: OpenAiFunctionCall {
                                name: name.clone(),
                                arguments: input.to_string(),
                            },
                        })
                    }
                    (AnthropicRole::User, AnthropicContentBlock::ToolUse { .. }) => {
                        return Err(unsupported("tool_use blocks in user messages"))
                    }
                    (AnthropicRole::Assistant, AnthropicContentBlock::ToolResult { .. }) => {
                        return Err(unsupported("tool_result blocks in assistant messages"))
                    }
                }
            }

            match message.role {
                AnthropicRole::User => {
                    if !parts.is_empty() {
                        messages.push(OpenAiMessage::User {
                            content: OpenAiMessageContent::Parts(parts),
                        });
                    }
                }
                AnthropicRole::Assistant => messages.push(OpenAiMessage::Assistant {
                    content: (!parts.is_empty()).then_some(OpenAiMessageContent::Parts(parts)),
                    tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
                }),
            }
        }

        Ok(messages)
    }

    fn tool_definition_from_hub(&self, tool: &OpenAiToolDefinition) -> Self::ToolDefinition {
        AnthropicToolDefinition {
            name: tool.function.name.clone(),
            description: tool.function.description.clone(),
            input_schema: tool
                .function
                .parameters
                .clone()
                .unwrap_or_else(empty_object_schema),
            cache_control: None,
        }
    }

    fn tool_definition_to_hub(&self, tool: &Self::ToolDefinition) -> OpenAiToolDefinition {
        OpenAiToolDefinition {
            kind: FunctionKind::Function,
            function: OpenAiFunctionDefinition {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: Some(tool.input_schema.clone()),
                strict: None,
            },
        }
    }

    fn tool_choice_from_hub(&self, choice: &OpenAiToolChoice) -> Self::ToolChoice {
        match choice {
            OpenAiToolChoice::Mode(OpenAiToolChoiceMode::None) => AnthropicToolChoice::None,
            OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Auto) => AnthropicToolChoice::Auto,
            OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Required) => AnthropicToolChoice::Any,
            OpenAiToolChoice::Named(named) => AnthropicToolChoice::Tool {
                name: named.function.name.clone(),
            },
        }
    }

    fn tool_choice_to_hub(&self, choice: &Self::ToolChoice) -> OpenAiToolChoice {
        match choice {
            AnthropicToolChoice::None => OpenAiToolChoice::Mode(OpenAiToolChoiceMode::None),
            AnthropicToolChoice::Auto => OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Auto),
            AnthropicToolChoice::Any => OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Required),
            AnthropicToolChoice::Tool { name } => OpenAiToolChoice::function(name.clone()),
        }
    }
}
