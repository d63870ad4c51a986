use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use phoenix_prompt::{ConverterOptions, SerializationFallback};
use serde::Deserialize;

use crate::error::{to_env_var, ConfigError};

#[derive(Debug, Default, Deserialize)]
pub struct ConverterSettings {
    #[serde(default)]
    pub serialization_fallback: SerializationFallback,
}

impl ConverterSettings {
    pub fn options(&self) -> ConverterOptions {
        ConverterOptions {
            serialization_fallback: self.serialization_fallback,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub pretty: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            pretty: false,
            theme: default_theme(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub converter: ConverterSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub log: LogSettings,
}

impl Settings {
    /// Load settings from defaults, then an optional TOML file, then `PHOENIX_PROMPT_` variables
    pub fn new(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("converter.serialization_fallback", "empty_string")?
            .set_default("output.pretty", false)?
            .set_default("output.theme", default_theme())?
            .set_default("log.level", default_log_level())?;

        if let Some(path) = file {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("PHOENIX_PROMPT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            match err {
                config::ConfigError::Type { key: Some(key), .. } => ConfigError::InvalidValue {
                    env_var: to_env_var(&key),
                    key,
                },
                err => ConfigError::Other(err),
            }
        })
    }
}

fn default_theme() -> String {
    "Monokai Extended".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}
