use std::path::Path;

use anyhow::{bail, Result};
use phoenix_prompt::providers::anthropic::{AnthropicAdapter, AnthropicConversation};
use phoenix_prompt::providers::factory::ModelProvider;
use phoenix_prompt::providers::openai::OpenAiMessage;
use phoenix_prompt::FormatConverter;
use serde_json::Value;

use super::read_json;

/// Convert a provider conversation back to Phoenix messages
///
/// OpenAI compatible input is a list of hub messages, Anthropic input is an object with an
/// optional `system` prompt and a `messages` list.
pub fn execute(path: &Path, provider: ModelProvider, converter: &FormatConverter) -> Result<Value> {
    let document = read_json(path)?;
    let messages = match provider {
        ModelProvider::OpenAi | ModelProvider::AzureOpenAi => {
            let hub: Vec<OpenAiMessage> = serde_json::from_value(document)?;
            converter.messages_from_hub(&hub)
        }
        ModelProvider::Anthropic => {
            let conversation: AnthropicConversation = serde_json::from_value(document)?;
            converter.messages_from_provider(&AnthropicAdapter, &conversation)?
        }
        ModelProvider::Gemini => bail!("Model provider {} has no message conversion", provider),
    };
    Ok(serde_json::to_value(messages)?)
}
