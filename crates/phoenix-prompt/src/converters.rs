//! Conversions between Phoenix prompt documents and provider formats
//!
//! Phoenix documents are only ever converted to and from the OpenAI shaped hub format in
//! [`crate::providers::openai`]. Other providers are spokes: a [`HubAdapter`] maps them to and
//! from the hub, so any Phoenix document reaches any provider in two steps.
mod from_hub;
mod normalize;
mod request;
mod to_hub;

use serde::{Deserialize, Serialize};

use crate::errors::{ConversionError, ConversionResult};
use crate::models::message::Message;
use crate::providers::base::HubAdapter;

/// What to do when a tool call's arguments or a tool result cannot be encoded as JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializationFallback {
    /// Substitute an empty string and log a warning
    #[default]
    EmptyString,
    /// Fail the conversion with [`ConversionError::Serialization`]
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterOptions {
    #[serde(default)]
    pub serialization_fallback: SerializationFallback,
}

/// Converts Phoenix documents to and from the hub format and, through it, provider formats
///
/// The converter holds no state beyond its options; every operation is a pure function of
/// its input and may be called from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct FormatConverter {
    options: ConverterOptions,
}

impl FormatConverter {
    pub fn new(options: ConverterOptions) -> Self {
        FormatConverter { options }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Phoenix messages in a provider's conversation format
    pub fn messages_to_provider<A: HubAdapter>(
        &self,
        adapter: &A,
        messages: &[Message],
    ) -> ConversionResult<A::Conversation> {
        adapter.conversation_from_hub(&self.messages_to_hub(messages)?)
    }

    /// A provider's conversation as Phoenix messages
    pub fn messages_from_provider<A: HubAdapter>(
        &self,
        adapter: &A,
        conversation: &A::Conversation,
    ) -> ConversionResult<Vec<Message>> {
        Ok(self.messages_from_hub(&adapter.conversation_to_hub(conversation)?))
    }

    fn stringify<T: Serialize + ?Sized>(
        &self,
        value: &T,
        context: &'static str,
    ) -> ConversionResult<String> {
        match serde_json::to_string(value) {
            Ok(encoded) => Ok(encoded),
            Err(e) => match self.options.serialization_fallback {
                SerializationFallback::EmptyString => {
                    tracing::warn!(
                        context,
                        error = %e,
                        "Could not encode value as JSON, using an empty string"
                    );
                    Ok(String::new())
                }
                SerializationFallback::Error => Err(ConversionError::Serialization {
                    context,
                    message: e.to_string(),
                }),
            },
        }
    }
}
