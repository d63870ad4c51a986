use serde::{Deserialize, Serialize};

/// The author of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Instructions for the model, e.g. the OpenAI developer role or an Anthropic system prompt
    System,
    User,
    /// The model itself, normalized to AI for every provider
    Ai,
    Tool,
}
