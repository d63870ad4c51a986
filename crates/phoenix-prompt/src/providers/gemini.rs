use serde::{Deserialize, Serialize};

use crate::errors::{ConversionError, ConversionResult};
use crate::models::tool::ToolChoice;

/// Generation config fields Gemini accepts; it has no tool or response format conversion here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiInvocationParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

/// Read a Gemini function calling mode (`AUTO`, `ANY` or `NONE`, any case)
pub fn tool_choice_to_phoenix(mode: &str) -> ConversionResult<ToolChoice> {
    match mode.to_ascii_uppercase().as_str() {
        "AUTO" => Ok(ToolChoice::ZeroOrMore),
        "ANY" => Ok(ToolChoice::OneOrMore),
        "NONE" => Ok(ToolChoice::None),
        _ => Err(ConversionError::UnknownToolChoice(mode.to_string())),
    }
}

/// Gemini cannot name a single function here, a specific tool becomes `ANY`
pub fn tool_choice_from_phoenix(choice: &ToolChoice) -> String {
    match choice {
        ToolChoice::None => "NONE",
        ToolChoice::ZeroOrMore => "AUTO",
        ToolChoice::OneOrMore | ToolChoice::SpecificFunctionTool { .. } => "ANY",
    }
    .to_string()
}
