use std::path::Path;

use anyhow::Result;
use phoenix_prompt::models::message::Message;
use phoenix_prompt::models::prompt::{PromptVersion, Template};
use phoenix_prompt::FormatConverter;
use serde_json::{json, Value};

use super::read_json;

/// Convert Phoenix messages, or a whole prompt version, to the hub format
///
/// The input may be a single message, a list of messages, or a prompt version. A prompt
/// version's template is converted as written, without substituting variables.
pub fn execute(path: &Path, converter: &FormatConverter) -> Result<Value> {
    let document = read_json(path)?;

    if document.get("template").is_some() {
        let version: PromptVersion = serde_json::from_value(document)?;
        return prompt_version_to_hub(&version, converter);
    }

    let messages: Vec<Message> = if document.is_array() {
        serde_json::from_value(document)?
    } else {
        vec![serde_json::from_value(document)?]
    };
    tracing::debug!(count = messages.len(), "Converting messages to hub format");
    Ok(serde_json::to_value(converter.messages_to_hub(&messages)?)?)
}

fn prompt_version_to_hub(version: &PromptVersion, converter: &FormatConverter) -> Result<Value> {
    let messages = match &version.template {
        Template::Chat { messages } => messages.clone(),
        Template::String { template } => vec![Message::user().with_text(template.clone())],
    };

    let mut converted = json!({ "messages": converter.messages_to_hub(&messages)? });
    if let Some(tools) = &version.tools {
        let definitions = tools
            .tools
            .iter()
            .map(|tool| converter.tool_definition_to_hub(tool))
            .collect::<Result<Vec<_>, _>>()?;
        converted["tools"] = serde_json::to_value(definitions)?;
        if let Some(choice) = &tools.tool_choice {
            converted["tool_choice"] = serde_json::to_value(converter.tool_choice_to_hub(choice))?;
        }
    }
    if let Some(format) = &version.response_format {
        converted["response_format"] =
            serde_json::to_value(converter.response_format_to_hub(format)?)?;
    }
    Ok(converted)
}
