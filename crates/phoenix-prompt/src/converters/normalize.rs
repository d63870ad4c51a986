//! Provider specific settings in and out of their stored Phoenix shape
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::FormatConverter;
use crate::errors::{ConversionError, ConversionResult};
use crate::models::invocation::{InvocationParameters, InvocationParams};
use crate::models::response_format::ResponseFormat;
use crate::models::tool::{ToolChoice, Tools};
use crate::providers::anthropic::{
    AnthropicAdapter, AnthropicCacheControl, AnthropicInvocationParameters, AnthropicToolChoice,
    AnthropicToolDefinition,
};
use crate::providers::base::HubAdapter;
use crate::providers::factory::ModelProvider;
use crate::providers::gemini::{self, GeminiInvocationParameters};
use crate::providers::openai::{
    OpenAiAdapter, OpenAiInvocationParameters, OpenAiResponseFormat, OpenAiToolChoice,
    OpenAiToolDefinition,
};

const TOOL_CHOICE: &str = "tool_choice";
const REASONING_EFFORT: &str = "reasoning_effort";
const CACHE_CONTROL: &str = "cache_control";

fn unsupported(provider: ModelProvider, feature: &'static str) -> ConversionError {
    ConversionError::UnsupportedFeature {
        provider: provider.to_string(),
        feature,
    }
}

fn extra<T: DeserializeOwned>(
    extra: &Map<String, Value>,
    key: &str,
) -> ConversionResult<Option<T>> {
    extra
        .get(key)
        .map(|value| serde_json::from_value(value.clone()))
        .transpose()
        .map_err(ConversionError::from)
}

fn insert_extra<T: Serialize>(
    extra: &mut Map<String, Value>,
    key: &str,
    value: Option<&T>,
) -> ConversionResult<()> {
    if let Some(value) = value {
        extra.insert(key.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}

impl FormatConverter {
    /// Read a provider's invocation parameters into the Phoenix shape
    ///
    /// Fields a provider does not define are rejected rather than dropped.
    pub fn normalize_invocation_parameters(
        &self,
        parameters: &Value,
        provider: ModelProvider,
    ) -> ConversionResult<InvocationParameters> {
        let mut normalized = InvocationParams::default();
        match provider {
            ModelProvider::OpenAi | ModelProvider::AzureOpenAi => {
                let p: OpenAiInvocationParameters = serde_json::from_value(parameters.clone())?;
                normalized.temperature = p.temperature;
                normalized.max_completion_tokens = p.max_tokens;
                normalized.frequency_penalty = p.frequency_penalty;
                normalized.presence_penalty = p.presence_penalty;
                normalized.top_p = p.top_p;
                normalized.random_seed = p.seed;
                insert_extra(
                    &mut normalized.extra_parameters,
                    REASONING_EFFORT,
                    p.reasoning_effort.as_ref(),
                )?;
                let tool_choice = p
                    .tool_choice
                    .as_ref()
                    .map(|choice| self.tool_choice_from_hub(choice));
                insert_extra(
                    &mut normalized.extra_parameters,
                    TOOL_CHOICE,
                    tool_choice.as_ref(),
                )?;
            }
            ModelProvider::Anthropic => {
                let p: AnthropicInvocationParameters = serde_json::from_value(parameters.clone())?;
                normalized.temperature = p.temperature;
                normalized.max_completion_tokens = p.max_tokens;
                normalized.top_p = p.top_p;
                normalized.stop_sequences = p.stop_sequences;
                let tool_choice = p.tool_choice.as_ref().map(|choice| {
                    self.tool_choice_from_hub(&AnthropicAdapter.tool_choice_to_hub(choice))
                });
                insert_extra(
                    &mut normalized.extra_parameters,
                    TOOL_CHOICE,
                    tool_choice.as_ref(),
                )?;
            }
            ModelProvider::Gemini => {
                let p: GeminiInvocationParameters = serde_json::from_value(parameters.clone())?;
                normalized.temperature = p.temperature;
                normalized.max_completion_tokens = p.max_output_tokens;
                normalized.stop_sequences = p.stop_sequences;
                normalized.presence_penalty = p.presence_penalty;
                normalized.frequency_penalty = p.frequency_penalty;
                normalized.top_p = p.top_p;
                normalized.top_k = p.top_k;
                let tool_choice = p
                    .tool_choice
                    .as_deref()
                    .map(gemini::tool_choice_to_phoenix)
                    .transpose()?;
                insert_extra(
                    &mut normalized.extra_parameters,
                    TOOL_CHOICE,
                    tool_choice.as_ref(),
                )?;
            }
        }
        Ok(InvocationParameters::new(normalized))
    }

    pub fn openai_parameters(
        &self,
        parameters: &InvocationParams,
    ) -> ConversionResult<OpenAiInvocationParameters> {
        let tool_choice = extra::<ToolChoice>(&parameters.extra_parameters, TOOL_CHOICE)?;
        Ok(OpenAiInvocationParameters {
            temperature: parameters.temperature,
            max_tokens: parameters.max_completion_tokens,
            frequency_penalty: parameters.frequency_penalty,
            presence_penalty: parameters.presence_penalty,
            top_p: parameters.top_p,
            seed: parameters.random_seed,
            reasoning_effort: extra(&parameters.extra_parameters, REASONING_EFFORT)?,
            tool_choice: tool_choice.map(|choice| self.tool_choice_to_hub(&choice)),
        })
    }

    pub fn anthropic_parameters(
        &self,
        parameters: &InvocationParams,
    ) -> ConversionResult<AnthropicInvocationParameters> {
        let tool_choice = extra::<ToolChoice>(&parameters.extra_parameters, TOOL_CHOICE)?;
        Ok(AnthropicInvocationParameters {
            temperature: parameters.temperature,
            max_tokens: parameters.max_completion_tokens,
            top_p: parameters.top_p,
            stop_sequences: parameters.stop_sequences.clone(),
            tool_choice: tool_choice.map(|choice| {
                AnthropicAdapter.tool_choice_from_hub(&self.tool_choice_to_hub(&choice))
            }),
        })
    }

    pub fn gemini_parameters(
        &self,
        parameters: &InvocationParams,
    ) -> ConversionResult<GeminiInvocationParameters> {
        let tool_choice = extra::<ToolChoice>(&parameters.extra_parameters, TOOL_CHOICE)?;
        Ok(GeminiInvocationParameters {
            temperature: parameters.temperature,
            max_output_tokens: parameters.max_completion_tokens,
            stop_sequences: parameters.stop_sequences.clone(),
            presence_penalty: parameters.presence_penalty,
            frequency_penalty: parameters.frequency_penalty,
            top_p: parameters.top_p,
            top_k: parameters.top_k,
            tool_choice: tool_choice.as_ref().map(gemini::tool_choice_from_phoenix),
        })
    }

    /// Write stored invocation parameters in a provider's own field names
    pub fn denormalize_invocation_parameters(
        &self,
        parameters: &InvocationParameters,
        provider: ModelProvider,
    ) -> ConversionResult<Value> {
        let parameters = &parameters.parameters;
        let denormalized = match provider {
            ModelProvider::OpenAi | ModelProvider::AzureOpenAi => {
                serde_json::to_value(self.openai_parameters(parameters)?)?
            }
            ModelProvider::Anthropic => {
                serde_json::to_value(self.anthropic_parameters(parameters)?)?
            }
            ModelProvider::Gemini => {
                serde_json::to_value(self.gemini_parameters(parameters)?)?
            }
        };
        Ok(denormalized)
    }

    /// Convert a spoke's tool definitions, and optionally its tool choice, to stored tools
    pub fn tools_from_provider<A: HubAdapter>(
        &self,
        adapter: &A,
        tools: &[A::ToolDefinition],
        tool_choice: Option<&A::ToolChoice>,
    ) -> ConversionResult<Tools> {
        let definitions = tools
            .iter()
            .map(|tool| self.tool_definition_from_hub(&adapter.tool_definition_to_hub(tool)))
            .collect::<ConversionResult<Vec<_>>>()?;
        let mut converted = Tools::new(definitions)?;
        converted.tool_choice = tool_choice
            .map(|choice| self.tool_choice_from_hub(&adapter.tool_choice_to_hub(choice)));
        Ok(converted)
    }

    /// Convert stored tools to a spoke's tool definitions and tool choice
    pub fn tools_to_provider<A: HubAdapter>(
        &self,
        adapter: &A,
        tools: &Tools,
    ) -> ConversionResult<(Vec<A::ToolDefinition>, Option<A::ToolChoice>)> {
        let definitions = tools
            .tools
            .iter()
            .map(|tool| {
                self.tool_definition_to_hub(tool)
                    .map(|hub| adapter.tool_definition_from_hub(&hub))
            })
            .collect::<ConversionResult<Vec<_>>>()?;
        let tool_choice = tools
            .tool_choice
            .as_ref()
            .map(|choice| adapter.tool_choice_from_hub(&self.tool_choice_to_hub(choice)));
        Ok((definitions, tool_choice))
    }

    pub(crate) fn anthropic_tools(
        &self,
        tools: &Tools,
    ) -> ConversionResult<(Vec<AnthropicToolDefinition>, Option<AnthropicToolChoice>)> {
        let (mut definitions, tool_choice) = self.tools_to_provider(&AnthropicAdapter, tools)?;
        // the hub has no cache control, it rides along in the stored extra parameters
        for (definition, tool) in definitions.iter_mut().zip(&tools.tools) {
            definition.cache_control =
                extra::<AnthropicCacheControl>(&tool.extra_parameters, CACHE_CONTROL)?;
        }
        Ok((definitions, tool_choice))
    }

    /// Read a provider's tool definitions into stored tools
    pub fn normalize_tools(
        &self,
        tools: &Value,
        provider: ModelProvider,
        tool_choice: Option<&Value>,
    ) -> ConversionResult<Tools> {
        match provider {
            ModelProvider::OpenAi | ModelProvider::AzureOpenAi => {
                let definitions: Vec<OpenAiToolDefinition> =
                    serde_json::from_value(tools.clone())?;
                let choice: Option<OpenAiToolChoice> = tool_choice
                    .map(|choice| serde_json::from_value(choice.clone()))
                    .transpose()?;
                self.tools_from_provider(&OpenAiAdapter, &definitions, choice.as_ref())
            }
            ModelProvider::Anthropic => {
                let definitions: Vec<AnthropicToolDefinition> =
                    serde_json::from_value(tools.clone())?;
                let choice: Option<AnthropicToolChoice> = tool_choice
                    .map(|choice| serde_json::from_value(choice.clone()))
                    .transpose()?;
                let mut converted =
                    self.tools_from_provider(&AnthropicAdapter, &definitions, choice.as_ref())?;
                for (tool, definition) in converted.tools.iter_mut().zip(&definitions) {
                    insert_extra(
                        &mut tool.extra_parameters,
                        CACHE_CONTROL,
                        definition.cache_control.as_ref(),
                    )?;
                }
                Ok(converted)
            }
            ModelProvider::Gemini => Err(unsupported(provider, "tools")),
        }
    }

    /// Write stored tools as `{"tools": [...], "tool_choice": ...}` in a provider's format
    pub fn denormalize_tools(
        &self,
        tools: &Tools,
        provider: ModelProvider,
    ) -> ConversionResult<Value> {
        let (definitions, tool_choice) = match provider {
            ModelProvider::OpenAi | ModelProvider::AzureOpenAi => {
                let (definitions, tool_choice) = self.tools_to_provider(&OpenAiAdapter, tools)?;
                (serde_json::to_value(definitions)?, serde_json::to_value(tool_choice)?)
            }
            ModelProvider::Anthropic => {
                let (definitions, tool_choice) = self.anthropic_tools(tools)?;
                (serde_json::to_value(definitions)?, serde_json::to_value(tool_choice)?)
            }
            ModelProvider::Gemini => return Err(unsupported(provider, "tools")),
        };
        let mut denormalized = json!({ "tools": definitions });
        if !tool_choice.is_null() {
            denormalized[TOOL_CHOICE] = tool_choice;
        }
        Ok(denormalized)
    }

    pub fn normalize_response_format(
        &self,
        response_format: &Value,
        provider: ModelProvider,
    ) -> ConversionResult<ResponseFormat> {
        if !provider.is_openai_compatible() {
            return Err(unsupported(provider, "response_format"));
        }
        let format: OpenAiResponseFormat = serde_json::from_value(response_format.clone())?;
        self.response_format_from_hub(&format)
    }

    pub fn denormalize_response_format(
        &self,
        response_format: &ResponseFormat,
        provider: ModelProvider,
    ) -> ConversionResult<Value> {
        if !provider.is_openai_compatible() {
            return Err(unsupported(provider, "response_format"));
        }
        Ok(serde_json::to_value(self.response_format_to_hub(response_format)?)?)
    }
}
