//! Internal error types for Gemini operations.
//!
//! These errors are internal to `gemgate-gemini` and are mapped to core
//! port errors at the boundary.

use std::path::PathBuf;

use gemgate_core::GenerationError;
use thiserror::Error;

/// Result type alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Errors related to Gemini API operations.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key is configured; no request was sent.
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    /// API request failed with an HTTP error status.
    #[error("Gemini API request failed with status {status}: {message}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// Error message from the response body, or the raw body
        message: String,
    },

    /// API returned a response without usable text.
    #[error("Invalid response from Gemini API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// An image file could not be read.
    #[error("Failed to read image file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<GeminiError> for GenerationError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => Self::Unavailable(err.to_string()),
            GeminiError::ApiRequestFailed { .. } | GeminiError::Network(_) => {
                Self::Upstream(err.to_string())
            }
            GeminiError::InvalidResponse { message } => Self::InvalidResponse(message),
            GeminiError::JsonParse(e) => Self::InvalidResponse(e.to_string()),
            GeminiError::FileRead { .. } => Self::Internal(err.to_string()),
        }
    }
}
