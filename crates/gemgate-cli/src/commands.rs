//! Main commands enum and primary subcommands.

use clap::{Args, Subcommand};
use gemgate_core::GeminiModel;

use crate::config::{DEFAULT_HOST, DEFAULT_PORT, ServiceArgs};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve(ServeArgs),

    /// Send one prompt (with optional images) and print the reply
    Ask(AskArgs),
}

/// Arguments for `gemgate serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "GEMGATE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "GEMGATE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Comma-separated CORS origins; all origins are allowed when omitted
    #[arg(long = "allowed-origins", value_delimiter = ',')]
    pub allowed_origins: Option<Vec<String>>,

    #[command(flatten)]
    pub service: ServiceArgs,
}

/// Arguments for `gemgate ask`.
#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Prompt text, sent verbatim
    pub message: String,

    /// Model identifier
    #[arg(short, long, default_value_t = GeminiModel::default())]
    pub model: GeminiModel,

    /// Image reference: local path, http(s) URL, or data URI (repeatable)
    #[arg(short, long = "file")]
    pub files: Vec<String>,

    #[command(flatten)]
    pub service: ServiceArgs,
}
