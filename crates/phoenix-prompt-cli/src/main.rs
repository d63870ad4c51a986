use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use phoenix_prompt::providers::factory::ModelProvider;
use phoenix_prompt::FormatConverter;
use tracing_subscriber::EnvFilter;

mod commands;
mod configuration;
mod error;
mod output;

use configuration::Settings;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with converter, output and log settings
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Syntax highlight the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert Phoenix messages or a prompt version to the OpenAI hub format
    ToHub {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Convert a provider conversation back to Phoenix messages
    FromHub {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Format of the input conversation
        #[arg(long, default_value = "openai", value_parser = ModelProvider::parse)]
        provider: ModelProvider,
    },
    /// Build a provider request from a prompt version
    Request {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Defaults to the provider the prompt version was saved with
        #[arg(long, value_parser = ModelProvider::parse)]
        provider: Option<ModelProvider>,
        /// Template variable as NAME=VALUE, may be repeated
        #[arg(
            long = "var",
            value_name = "NAME=VALUE",
            value_parser = commands::request::parse_variable
        )]
        variables: Vec<(String, String)>,
    },
    /// Convert a provider's invocation parameters to the Phoenix shape
    NormalizeParams {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, value_parser = ModelProvider::parse)]
        provider: ModelProvider,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::new(cli.config.as_deref())?;
    settings.output.pretty |= cli.pretty;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let converter = FormatConverter::new(settings.converter.options());
    let value = match &cli.command {
        Command::ToHub { file } => commands::to_hub::execute(file, &converter)?,
        Command::FromHub { file, provider } => {
            commands::from_hub::execute(file, *provider, &converter)?
        }
        Command::Request {
            file,
            provider,
            variables,
        } => commands::request::execute(file, *provider, variables, &converter)?,
        Command::NormalizeParams { file, provider } => {
            commands::normalize_params::execute(file, *provider, &converter)?
        }
    };

    output::print_json(&value, &settings.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_request_arguments() {
        let cli = Cli::try_parse_from([
            "phoenix-prompt",
            "request",
            "prompt.json",
            "--provider",
            "Anthropic",
            "--var",
            "name=Ada",
            "--var",
            "mood=calm",
            "--pretty",
        ])
        .unwrap();
        assert!(cli.pretty);
        match cli.command {
            Command::Request {
                provider,
                variables,
                ..
            } => {
                assert_eq!(provider, Some(ModelProvider::Anthropic));
                assert_eq!(variables.len(), 2);
                assert_eq!(variables[0], ("name".to_string(), "Ada".to_string()));
            }
            _ => panic!("Expected request command"),
        }
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from([
            "phoenix-prompt",
            "normalize-params",
            "p.json",
            "--provider",
            "bard"
        ])
        .is_err());
    }
}
