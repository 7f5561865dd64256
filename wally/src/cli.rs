//! Command-line front-end.
//!
//! Flags are collected as raw strings and handed to the validation pipeline
//! unchanged, so missing or malformed values are reported by the schema
//! (`--prompt is required`) rather than by clap.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{self, Config, ConfigError, Field};
use crate::exit_codes;
use crate::io::args_file::load_args_file;
use crate::io::probe::PathProbe;

#[derive(Debug, Parser)]
#[command(
    name = "wally",
    version,
    about = "Simple orchestration for agent invocation with context replay"
)]
pub struct Cli {
    /// Prompt file replayed to the agent on every invocation.
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Script whose success stops the loop.
    #[arg(short, long)]
    pub check: Option<String>,

    /// Maximum number of agent invocations (0 = unbounded). [default: 0]
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Seconds to wait between invocations. [default: 3]
    #[arg(short, long)]
    pub wait: Option<String>,

    /// Agent profile to invoke. [default: build]
    #[arg(short, long)]
    pub agent: Option<String>,

    /// Model identifier. [default: opencode/grok-code-fast-1]
    #[arg(short, long)]
    pub model: Option<String>,

    /// TOML file with values for any of the above; flags take precedence.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    fn flag(&self, field: Field) -> Option<&String> {
        match field {
            Field::Prompt => self.prompt.as_ref(),
            Field::Check => self.check.as_ref(),
            Field::Limit => self.limit.as_ref(),
            Field::Wait => self.wait.as_ref(),
            Field::Agent => self.agent.as_ref(),
            Field::Model => self.model.as_ref(),
        }
    }

    /// Raw input bag: args file values overlaid with explicit flags.
    pub fn raw_input(&self) -> Result<Value> {
        let mut input = match &self.config {
            Some(path) => load_args_file(path)?,
            None => Map::new(),
        };
        for field in Field::ALL {
            if let Some(value) = self.flag(field) {
                input.insert(field.as_str().to_string(), Value::String(value.clone()));
            }
        }
        Ok(Value::Object(input))
    }
}

/// Assemble raw input from `cli` and validate it.
pub async fn run<P: PathProbe + ?Sized>(cli: &Cli, probe: &P) -> Result<Config> {
    let input = cli.raw_input()?;
    config::validate(&input, probe).await
}

/// Render a config error as `--<path> <reason>`, or the reason alone.
pub fn format_config_error(error: &ConfigError) -> String {
    match error.path() {
        Some(path) => format!("--{path} {}", error.reason()),
        None => error.reason().to_string(),
    }
}

/// Exit code and stderr message for a failed run.
///
/// Only [`ConfigError`] gets flag formatting; anything else is shown with its
/// full context chain.
pub fn describe_failure(err: &anyhow::Error) -> (i32, String) {
    match err.downcast_ref::<ConfigError>() {
        Some(config_err) => {
            for issue in config_err.issues().iter().skip(1) {
                debug!(%issue, "additional config issue");
            }
            (exit_codes::INVALID_CONFIG, format_config_error(config_err))
        }
        None => (exit_codes::FAILURE, format!("{err:#}")),
    }
}
