use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::server::{DEFAULT_MODEL, DEFAULT_UPSTREAM};

#[derive(Parser, Debug)]
#[command(name = "assistant-tui")]
#[command(version)]
#[command(about = "Terminal chat client for a personal AI assistant")]
pub struct Args {
    /// Directory holding the stored config and logs (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the chat client (default)
    Chat(ChatArgs),
    /// Run the assistant endpoint the client talks to
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct ChatArgs {
    /// URL of the assistant endpoint
    #[arg(long, env = "ASSISTANT_ENDPOINT")]
    pub endpoint: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub bind: String,

    /// Key for the upstream chat-completions API
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// Upstream chat-completions URL
    #[arg(long, default_value = DEFAULT_UPSTREAM)]
    pub upstream: String,

    /// Upstream model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
}
