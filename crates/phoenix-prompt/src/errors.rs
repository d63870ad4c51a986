use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("TOOL role message must have a ToolResultContentPart")]
    MissingToolResult,

    #[error("Failed to serialize {context}: {message}")]
    Serialization {
        context: &'static str,
        message: String,
    },

    #[error("Could not interpret tool call arguments for id {id}: {message}")]
    InvalidToolArguments { id: String, message: String },

    #[error("Invalid JSON schema: {0}")]
    InvalidJsonSchema(String),

    #[error("A tools definition must contain at least one tool")]
    EmptyTools,

    #[error("Unrecognized tool choice: {0}")]
    UnknownToolChoice(String),

    #[error("Unsupported model provider: {0}")]
    UnsupportedProvider(String),

    #[error("Model provider {provider} does not support {feature}")]
    UnsupportedFeature {
        provider: String,
        feature: &'static str,
    },

    #[error("Invalid prompt document: {0}")]
    Schema(#[from] serde_json::Error),
}

pub type ConversionResult<T> = Result<T, ConversionError>;
