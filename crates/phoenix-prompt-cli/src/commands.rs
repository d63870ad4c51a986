pub mod from_hub;
pub mod normalize_params;
pub mod request;
pub mod to_hub;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

pub(crate) fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("{} is not valid JSON", path.display()))
}
