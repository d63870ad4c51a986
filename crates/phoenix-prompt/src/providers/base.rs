use serde::Serialize;

use super::openai::{OpenAiMessage, OpenAiToolChoice, OpenAiToolDefinition};
use crate::errors::ConversionResult;

/// A provider wire format that converts to and from the OpenAI hub
///
/// Providers never convert between each other directly: a Phoenix document is first converted
/// to the hub, and an adapter takes it from there.
pub trait HubAdapter {
    /// A complete list of messages, including anything the provider keeps outside of them
    type Conversation;
    type ToolDefinition: Serialize;
    type ToolChoice: Serialize;

    fn conversation_from_hub(
        &self,
        messages: &[OpenAiMessage],
    ) -> ConversionResult<Self::Conversation>;

    fn conversation_to_hub(
        &self,
        conversation: &Self::Conversation,
    ) -> ConversionResult<Vec<OpenAiMessage>>;

    fn tool_definition_from_hub(&self, tool: &OpenAiToolDefinition) -> Self::ToolDefinition;

    fn tool_definition_to_hub(&self, tool: &Self::ToolDefinition) -> OpenAiToolDefinition;

    fn tool_choice_from_hub(&self, choice: &OpenAiToolChoice) -> Self::ToolChoice;

    fn tool_choice_to_hub(&self, choice: &Self::ToolChoice) -> OpenAiToolChoice;
}
