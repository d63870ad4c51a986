use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::models::prompt::TemplateFormat;

lazy_static! {
    static ref MUSTACHE_VARIABLE: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][\w.\-]*)\s*\}\}").unwrap();
    static ref FSTRING_TOKEN: Regex = Regex::new(r"\{\{|\}\}|\{([A-Za-z_]\w*)\}").unwrap();
}

/// Substitute variables into a template
///
/// Missing variables render as an empty string for MUSTACHE and are left as written for
/// FSTRING.
pub fn format_template(
    template: &str,
    format: TemplateFormat,
    variables: &HashMap<String, String>,
) -> String {
    match format {
        TemplateFormat::Mustache => MUSTACHE_VARIABLE
            .replace_all(template, |caps: &Captures| {
                variables.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned(),
        TemplateFormat::Fstring => FSTRING_TOKEN
            .replace_all(template, |caps: &Captures| match caps.get(1) {
                Some(name) => variables
                    .get(name.as_str())
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string()),
                None => caps[0][..1].to_string(),
            })
            .into_owned(),
        TemplateFormat::None => template.to_string(),
    }
}

/// The variable names used by a template, in order of first appearance
pub fn template_variables(template: &str, format: TemplateFormat) -> Vec<String> {
    let regex: &Regex = match format {
        TemplateFormat::Mustache => &*MUSTACHE_VARIABLE,
        TemplateFormat::Fstring => &*FSTRING_TOKEN,
        TemplateFormat::None => return Vec::new(),
    };

    let mut names: Vec<String> = Vec::new();
    for caps in regex.captures_iter(template) {
        if let Some(name) = caps.get(1) {
            if !names.iter().any(|n| n == name.as_str()) {
                names.push(name.as_str().to_string());
            }
        }
    }
    names
}
