use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Result};
use phoenix_prompt::models::prompt::PromptVersion;
use phoenix_prompt::providers::factory::ModelProvider;
use phoenix_prompt::FormatConverter;
use serde_json::Value;

use super::read_json;

/// Parse a `name=value` template variable
pub fn parse_variable(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE but got '{}'", raw)),
    }
}

/// Build the request a provider expects for a prompt version
///
/// The provider defaults to the one the prompt version was saved with.
pub fn execute(
    path: &Path,
    provider: Option<ModelProvider>,
    variables: &[(String, String)],
    converter: &FormatConverter,
) -> Result<Value> {
    let version: PromptVersion = serde_json::from_value(read_json(path)?)?;
    let provider = provider.unwrap_or(version.model_provider);
    let variables: HashMap<String, String> = variables.iter().cloned().collect();

    for name in version.variables() {
        if !variables.contains_key(&name) {
            tracing::warn!(variable = %name, "Template variable has no value");
        }
    }

    tracing::info!(%provider, model = %version.model_name, "Building request");
    let request = match provider {
        ModelProvider::OpenAi | ModelProvider::AzureOpenAi => {
            serde_json::to_value(converter.openai_request(&version, &variables)?)?
        }
        ModelProvider::Anthropic => {
            serde_json::to_value(converter.anthropic_request(&version, &variables)?)?
        }
        ModelProvider::Gemini => bail!("Model provider {} has no request conversion", provider),
    };
    Ok(request)
}
