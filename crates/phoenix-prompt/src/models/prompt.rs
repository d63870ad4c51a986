use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::content::ContentPart;
use super::invocation::InvocationParameters;
use super::message::Message;
use super::response_format::ResponseFormat;
use super::tool::Tools;
use crate::prompt_template::{format_template, template_variables};
use crate::providers::factory::ModelProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemplateType {
    Str,
    Chat,
}

/// How variables are written inside a template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TemplateFormat {
    /// `{{ variable }}`
    #[default]
    Mustache,
    /// `{variable}`, with `{{` and `}}` escaping literal braces
    Fstring,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version")]
pub enum Template {
    #[serde(rename = "chat-template-v1")]
    Chat { messages: Vec<Message> },
    #[serde(rename = "string-template-v1")]
    String { template: String },
}

/// A stored version of a prompt along with everything needed to invoke a model with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub model_provider: ModelProvider,
    pub model_name: String,
    pub template: Template,
    pub template_type: TemplateType,
    pub template_format: TemplateFormat,
    pub invocation_parameters: InvocationParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Tools>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl PromptVersion {
    /// The template's messages with every variable substituted
    ///
    /// A string template becomes a single USER message.
    pub fn formatted_messages(&self, variables: &HashMap<String, String>) -> Vec<Message> {
        match &self.template {
            Template::Chat { messages } => messages
                .iter()
                .map(|message| Message {
                    role: message.role,
                    content: message
                        .content
                        .iter()
                        .map(|part| match part.as_text() {
                            Some(text) => ContentPart::text(format_template(
                                text,
                                self.template_format,
                                variables,
                            )),
                            None => part.clone(),
                        })
                        .collect(),
                })
                .collect(),
            Template::String { template } => vec![Message::user().with_text(format_template(
                template,
                self.template_format,
                variables,
            ))],
        }
    }

    /// Variable names used anywhere in the template, in order of first appearance
    pub fn variables(&self) -> Vec<String> {
        let texts: Vec<&str> = match &self.template {
            Template::Chat { messages } => messages
                .iter()
                .flat_map(|message| message.content.iter().filter_map(ContentPart::as_text))
                .collect(),
            Template::String { template } => vec![template.as_str()],
        };

        let mut names: Vec<String> = Vec::new();
        for name in texts
            .into_iter()
            .flat_map(|text| template_variables(text, self.template_format))
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}
