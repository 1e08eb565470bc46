//! Command-line interface for the terminal front end.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;

/// Typed at the chat prompt to leave the session.
pub const EXIT_COMMAND: &str = "/exit";

/// Profile agent CLI
#[derive(Parser, Debug)]
#[command(
    name = "profile-agent",
    version,
    about = "Chat with the greeting agent about Shahid Ali"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand. They override env and file config.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model id (e.g. gemini-2.0-flash)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// URL fetched by the profile tool
    #[arg(long, global = true)]
    pub profile_url: Option<String>,

    /// Max model calls per turn
    #[arg(long, global = true)]
    pub max_turns: Option<usize>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long, global = true)]
    pub temperature: Option<f64>,
}

impl GlobalArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            model_id: self.model.clone(),
            base_url: self.base_url.clone(),
            profile_url: self.profile_url.clone(),
            max_turns: self.max_turns,
            temperature: self.temperature,
        }
    }
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Send a single message and print the reply
    Ask(AskArgs),
}

/// Arguments for `profile-agent ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Message to send
    pub prompt: String,
}

/// One line read at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum PromptInput<'a> {
    Exit,
    Empty,
    Message(&'a str),
}

pub fn parse_prompt_line(line: &str) -> PromptInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        PromptInput::Empty
    } else if trimmed == EXIT_COMMAND {
        PromptInput::Exit
    } else {
        PromptInput::Message(trimmed)
    }
}
