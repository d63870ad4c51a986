use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::{ConversionError, ConversionResult};

#[derive(
    EnumIter, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum ModelProvider {
    #[serde(rename = "OPENAI")]
    #[strum(serialize = "openai")]
    OpenAi,
    #[serde(rename = "AZURE_OPENAI")]
    #[strum(serialize = "azure_openai")]
    AzureOpenAi,
    #[serde(rename = "ANTHROPIC")]
    #[strum(serialize = "anthropic")]
    Anthropic,
    #[serde(rename = "GEMINI")]
    #[strum(serialize = "gemini")]
    Gemini,
}

impl ModelProvider {
    pub fn parse(name: &str) -> ConversionResult<Self> {
        name.parse()
            .map_err(|_| ConversionError::UnsupportedProvider(name.to_string()))
    }

    /// Azure serves the OpenAI API, so both take hub shaped payloads unchanged
    pub fn is_openai_compatible(&self) -> bool {
        matches!(self, ModelProvider::OpenAi | ModelProvider::AzureOpenAi)
    }
}
