//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `GatewayError` to exit codes and user-facing messages.

use gemgate_core::{GatewayError, GenerationError, ResolutionCause};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input (empty prompt, bad image reference).
    #[error("Invalid input: {0}")]
    Input(String),

    /// An upstream service failed (image host, generation API).
    #[error("{0}")]
    Upstream(String),

    /// Configuration error (e.g., missing API key).
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h:
    /// - 65: Data format error (bad input)
    /// - 69: Service unavailable
    /// - 74: IO error
    /// - 78: Configuration error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) => 65,    // EX_DATAERR
            Self::Upstream(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<GatewayError> for CliError {
    fn from(err: GatewayError) -> Self {
        let message = err.to_string();
        match err {
            GatewayError::NoMessages | GatewayError::EmptyPrompt | GatewayError::ModelRequired => {
                Self::Input(message)
            }
            GatewayError::ImageResolution(resolution) => match resolution.cause {
                ResolutionCause::Decode(_) | ResolutionCause::NotFound => Self::Input(message),
                ResolutionCause::Fetch(_) => Self::Upstream(message),
                ResolutionCause::Io(_) => Self::Io(message),
            },
            GatewayError::Generation(GenerationError::Unavailable(_)) => Self::Config(message),
            GatewayError::Generation(GenerationError::Internal(_)) => Self::Io(message),
            GatewayError::Generation(_) => Self::Upstream(message),
        }
    }
}
