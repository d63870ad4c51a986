//! These models represent Phoenix prompt documents
//!
//! A prompt is stored in a provider-agnostic shape and only converted to a provider's wire
//! format immediately before it is sent. The conversions follow a hub-and-spoke model:
//! - phoenix documents convert to and from the OpenAI shaped hub (see `providers::openai`)
//! - every other provider converts to and from the hub only (see `providers::anthropic`)
//!
//! The serde attributes on these types are the wire contract with callers, so tag strings
//! and field names match the stored documents exactly.
pub mod content;
pub mod invocation;
pub mod message;
pub mod prompt;
pub mod response_format;
pub mod role;
pub mod tool;
