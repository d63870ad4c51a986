use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Invalid value for {key}, check the config file or {env_var}")]
    InvalidValue { key: String, env_var: String },
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// The environment variable that overrides a dotted settings key
pub fn to_env_var(key: &str) -> String {
    format!("PHOENIX_PROMPT_{}", key.replace('.', "__").to_uppercase())
}
