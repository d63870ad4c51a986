pub mod anthropic;
pub mod base;
pub mod factory;
pub mod gemini;
pub mod openai;
