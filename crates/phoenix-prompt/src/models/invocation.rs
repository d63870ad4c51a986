use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationParametersKind {
    #[default]
    #[serde(rename = "invocation-parameters")]
    InvocationParameters,
}

/// Sampling settings shared by every provider
///
/// Settings only one provider understands, such as an OpenAI `reasoning_effort` or a provider
/// encoded `tool_choice`, are kept verbatim in `extra_parameters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u64>,
    #[serde(default)]
    pub extra_parameters: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationParameters {
    #[serde(rename = "type")]
    pub kind: InvocationParametersKind,
    pub parameters: InvocationParams,
}

impl InvocationParameters {
    pub fn new(parameters: InvocationParams) -> Self {
        InvocationParameters {
            kind: InvocationParametersKind::InvocationParameters,
            parameters,
        }
    }
}
