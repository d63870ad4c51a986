use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::{ContentPart, ToolCallArguments, ToolCallContent, ToolResultContent};
use super::role::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A prompt message, which owns an ordered list of content parts
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl Message {
    pub fn new(role: Role) -> Self {
        Message {
            role,
            content: Vec::new(),
        }
    }

    pub fn system() -> Self {
        Message::new(Role::System)
    }

    pub fn user() -> Self {
        Message::new(Role::User)
    }

    pub fn ai() -> Self {
        Message::new(Role::Ai)
    }

    pub fn tool() -> Self {
        Message::new(Role::Tool)
    }

    /// Add any content part to the message
    pub fn with_content(mut self, content: ContentPart) -> Self {
        self.content.push(content);
        self
    }

    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_content(ContentPart::text(text))
    }

    pub fn with_tool_call<I, N, A>(self, tool_call_id: I, name: N, arguments: A) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        A: Into<ToolCallArguments>,
    {
        self.with_content(ContentPart::tool_call(tool_call_id, name, arguments))
    }

    pub fn with_tool_result<I: Into<String>>(self, tool_call_id: I, result: Value) -> Self {
        self.with_content(ContentPart::tool_result(tool_call_id, result))
    }

    /// Concatenate the text parts, separated by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentPart::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tool_calls(&self) -> Vec<&ToolCallContent> {
        self.content
            .iter()
            .filter_map(ContentPart::as_tool_call)
            .collect()
    }

    /// The first tool result part, which is the one a TOOL message is answered with
    pub fn tool_result(&self) -> Option<&ToolResultContent> {
        self.content.iter().find_map(ContentPart::as_tool_result)
    }
}
