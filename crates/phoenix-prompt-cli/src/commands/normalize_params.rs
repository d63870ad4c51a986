use std::path::Path;

use anyhow::Result;
use phoenix_prompt::providers::factory::ModelProvider;
use phoenix_prompt::FormatConverter;
use serde_json::Value;

use super::read_json;

pub fn execute(path: &Path, provider: ModelProvider, converter: &FormatConverter) -> Result<Value> {
    let parameters = read_json(path)?;
    let normalized = converter.normalize_invocation_parameters(&parameters, provider)?;
    Ok(serde_json::to_value(normalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_normalize_openai_parameters() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json!({"max_tokens": 64, "seed": 3})).unwrap();

        let normalized =
            execute(file.path(), ModelProvider::OpenAi, &FormatConverter::default()).unwrap();
        assert_eq!(
            normalized,
            json!({
                "type": "invocation-parameters",
                "parameters": {
                    "max_completion_tokens": 64,
                    "random_seed": 3,
                    "extra_parameters": {}
                }
            })
        );
    }

    #[test]
    fn test_missing_file() {
        let err = execute(
            Path::new("/does/not/exist.json"),
            ModelProvider::Anthropic,
            &FormatConverter::default(),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
