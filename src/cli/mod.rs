//! CLI module for llm-bridge
//!
//! Provides command-line interface parsing for the `llm-bridge` binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use crate::utils::toml_config::DEFAULT_CONFIG_FILE;

/// llm-bridge - one-shot chat completions against a configured LLM provider
#[derive(Parser, Debug)]
#[command(
    name = "llm-bridge",
    version,
    about = "One-shot chat completions against a configured LLM provider",
    after_help = "EXAMPLES:\n    \
                  llm-bridge chat \"Why is the sky blue?\"\n    \
                  llm-bridge chat --system \"Answer in JSON\" --json \"List three colors\"\n    \
                  llm-bridge chat --model mistral:7b --option num_ctx=8192 \"Hi\"\n    \
                  llm-bridge config --validate"
)]
pub struct Cli {
    /// Path to the configuration file (built-in defaults are used if it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a prompt and print the completion
    Chat(ChatArgs),

    /// Show configuration information
    Config {
        /// Validate the configuration file and exit non-zero on errors
        #[arg(long)]
        validate: bool,
    },
}

/// Arguments of the `chat` subcommand
#[derive(clap::Args, Debug)]
pub struct ChatArgs {
    /// Prompt text; multiple words are joined with spaces
    #[arg(required = true)]
    pub prompt: Vec<String>,

    /// System instruction sent before the prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Named provider from the configuration file
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Override the provider's model
    #[arg(short, long, env = "OLLAMA_MODEL")]
    pub model: Option<String>,

    /// Override the provider's base URL
    #[arg(long, env = "OLLAMA_BASE_URL")]
    pub base_url: Option<String>,

    /// Override the sampling temperature
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Extra provider option as KEY=VALUE (VALUE is parsed as JSON when possible)
    #[arg(short = 'o', long = "option", value_parser = parse_option)]
    pub options: Vec<(String, Value)>,

    /// Repair and pretty-print the completion as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChatArgs {
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ")
    }
}

/// Parse `KEY=VALUE`, reading VALUE as JSON and falling back to a string
pub fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in '{}'", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
