use std::collections::HashMap;

use super::FormatConverter;
use crate::errors::{ConversionError, ConversionResult};
use crate::models::prompt::PromptVersion;
use crate::providers::anthropic::{AnthropicAdapter, AnthropicRequest, DEFAULT_MAX_TOKENS};
use crate::providers::base::HubAdapter;
use crate::providers::openai::OpenAiChatRequest;

impl FormatConverter {
    /// Build a chat completion request from a prompt version, substituting `variables`
    pub fn openai_request(
        &self,
        version: &PromptVersion,
        variables: &HashMap<String, String>,
    ) -> ConversionResult<OpenAiChatRequest> {
        let messages = self.messages_to_hub(&version.formatted_messages(variables))?;
        let mut parameters = self.openai_parameters(&version.invocation_parameters.parameters)?;

        let mut tools = None;
        let mut parallel_tool_calls = None;
        if let Some(stored) = &version.tools {
            tools = Some(
                stored
                    .tools
                    .iter()
                    .map(|tool| self.tool_definition_to_hub(tool))
                    .collect::<ConversionResult<Vec<_>>>()?,
            );
            if let Some(choice) = &stored.tool_choice {
                parameters.tool_choice = Some(self.tool_choice_to_hub(choice));
            }
            parallel_tool_calls = stored.disable_parallel_tool_calls.map(|disable| !disable);
        }

        let response_format = version
            .response_format
            .as_ref()
            .map(|format| self.response_format_to_hub(format))
            .transpose()?;

        Ok(OpenAiChatRequest {
            model: version.model_name.clone(),
            messages,
            tools,
            parallel_tool_calls,
            response_format,
            parameters,
        })
    }

    /// Build a messages API request from a prompt version, substituting `variables`
    pub fn anthropic_request(
        &self,
        version: &PromptVersion,
        variables: &HashMap<String, String>,
    ) -> ConversionResult<AnthropicRequest> {
        if version.response_format.is_some() {
            return Err(ConversionError::UnsupportedFeature {
                provider: "anthropic".to_string(),
                feature: "response_format",
            });
        }

        let hub = self.messages_to_hub(&version.formatted_messages(variables))?;
        let conversation = AnthropicAdapter.conversation_from_hub(&hub)?;
        let parameters = self.anthropic_parameters(&version.invocation_parameters.parameters)?;

        let mut tool_choice = parameters.tool_choice;
        let tools = match &version.tools {
            Some(stored) => {
                let (definitions, stored_choice) = self.anthropic_tools(stored)?;
                if stored_choice.is_some() {
                    tool_choice = stored_choice;
                }
                if stored.disable_parallel_tool_calls.is_some() {
                    tracing::debug!("Ignoring disable_parallel_tool_calls for anthropic");
                }
                Some(definitions)
            }
            None => None,
        };

        Ok(AnthropicRequest {
            model: version.model_name.clone(),
            system: conversation.system,
            messages: conversation.messages,
            max_tokens: parameters.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: parameters.temperature,
            top_p: parameters.top_p,
            stop_sequences: parameters.stop_sequences,
            tools,
            tool_choice,
        })
    }
}

impl PromptVersion {
    pub fn to_openai_request(
        &self,
        variables: &HashMap<String, String>,
    ) -> ConversionResult<OpenAiChatRequest> {
        FormatConverter::default().openai_request(self, variables)
    }

    pub fn to_anthropic_request(
        &self,
        variables: &HashMap<String, String>,
    ) -> ConversionResult<AnthropicRequest> {
        FormatConverter::default().anthropic_request(self, variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::anthropic::AnthropicToolChoice;
    use crate::providers::factory::ModelProvider;
    use crate::providers::openai::{OpenAiToolChoice, OpenAiToolChoiceMode};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn version() -> PromptVersion {
        serde_json::from_value(json!({
            "model_provider": "OPENAI",
            "model_name": "gpt-4o-mini",
            "template": {
                "version": "chat-template-v1",
                "messages": [
                    {"role": "SYSTEM", "content": [
                        {
                            "type": "text",
                            "text": {"text": "You answer questions about {{ topic }}."}
                        }
                    ]},
                    {"role": "USER", "content": [
                        {"type": "text", "text": {"text": "{{question}}"}}
                    ]}
                ]
            },
            "template_type": "CHAT",
            "template_format": "MUSTACHE",
            "invocation_parameters": {
                "type": "invocation-parameters",
                "parameters": {"temperature": 0.1, "max_completion_tokens": 200}
            },
            "tools": {
                "type": "tools-v1",
                "tools": [{
                    "type": "function-tool-v1",
                    "name": "search",
                    "schema": {
                        "type": "json-schema-draft-7-object-schema",
                        "json": {"type": "object", "properties": {"query": {"type": "string"}}}
                    }
                }],
                "tool_choice": {"type": "one-or-more"},
                "disable_parallel_tool_calls": true
            }
        }))
        .unwrap()
    }

    fn variables() -> HashMap<String, String> {
        HashMap::from([
            ("topic".to_string(), "rust".to_string()),
            ("question".to_string(), "What is a lifetime?".to_string()),
        ])
    }

    #[test]
    fn test_openai_request() {
        let request = version().to_openai_request(&variables()).unwrap();
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": [
                        {"type": "text", "text": "You answer questions about rust."}
                    ]},
                    {"role": "user", "content": [{"type": "text", "text": "What is a lifetime?"}]}
                ],
                "tools": [{
                    "type": "function",
                    "function": {
                        "name": "search",
                        "parameters": {
                            "type": "object",
                            "properties": {"query": {"type": "string"}}
                        }
                    }
                }],
                "parallel_tool_calls": false,
                "temperature": 0.1,
                "max_tokens": 200,
                "tool_choice": "required"
            })
        );
    }

    #[test]
    fn test_anthropic_request() {
        let mut version = version();
        version.invocation_parameters.parameters.max_completion_tokens = None;

        let request: Value =
            serde_json::to_value(version.to_anthropic_request(&variables()).unwrap()).unwrap();
        assert_eq!(
            request,
            json!({
                "model": "gpt-4o-mini",
                "system": "You answer questions about rust.",
                "messages": [
                    {"role": "user", "content": [{"type": "text", "text": "What is a lifetime?"}]}
                ],
                "max_tokens": 1024,
                "temperature": 0.1,
                "tools": [{
                    "name": "search",
                    "input_schema": {"type": "object", "properties": {"query": {"type": "string"}}}
                }],
                "tool_choice": {"type": "any"}
            })
        );
    }

    #[test]
    fn test_saved_anthropic_tool_choice_reaches_openai() {
        let converter = FormatConverter::default();
        let mut version = version();
        version.tools = None;
        version.model_provider = ModelProvider::Anthropic;
        version.invocation_parameters = converter
            .normalize_invocation_parameters(
                &json!({"max_tokens": 64, "tool_choice": {"type": "any"}}),
                ModelProvider::Anthropic,
            )
            .unwrap();

        let request = converter.openai_request(&version, &variables()).unwrap();
        assert_eq!(
            request.parameters.tool_choice,
            Some(OpenAiToolChoice::Mode(OpenAiToolChoiceMode::Required))
        );
        assert_eq!(request.parameters.max_tokens, Some(64));
    }

    #[test]
    fn test_saved_openai_tool_choice_reaches_anthropic() {
        let converter = FormatConverter::default();
        let mut version = version();
        version.tools = None;
        version.invocation_parameters = converter
            .normalize_invocation_parameters(
                &json!({"tool_choice": "required"}),
                ModelProvider::OpenAi,
            )
            .unwrap();

        let request = converter.anthropic_request(&version, &variables()).unwrap();
        assert_eq!(request.tool_choice, Some(AnthropicToolChoice::Any));
    }

    #[test]
    fn test_anthropic_request_rejects_response_format() {
        let mut version = version();
        version.response_format = Some(crate::models::response_format::ResponseFormat::new(
            "answer",
            json!({"type": "object"}),
        ));
        let err = version.to_anthropic_request(&variables()).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedFeature { .. }));
    }
}
