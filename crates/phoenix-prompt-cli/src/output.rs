use anyhow::{anyhow, Result};
use bat::PrettyPrinter;
use serde_json::Value;

use crate::configuration::OutputSettings;

/// Print a JSON document to stdout, highlighted when pretty output is enabled
pub fn print_json(value: &Value, settings: &OutputSettings) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    if settings.pretty {
        PrettyPrinter::new()
            .input_from_bytes(rendered.as_bytes())
            .language("json")
            .theme(&settings.theme)
            .print()
            .map_err(|e| anyhow!("Failed to render output: {}", e))?;
        println!();
    } else {
        println!("{}", rendered);
    }
    Ok(())
}
