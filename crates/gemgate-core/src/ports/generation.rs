//! Generation port.
//!
//! The external capability that turns a prompt, an optional set of image
//! files, and a model identifier into generated text.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Text produced by the generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub text: String,
}

impl GeneratedContent {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors surfaced by a generation backend.
///
/// The pipeline treats these opaquely; the variants only drive the status
/// code an adapter reports.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend is not configured (e.g. no API key).
    /// Callers should return 503 Service Unavailable.
    #[error("Generation client is not initialized: {0}")]
    Unavailable(String),

    /// Transport failure or non-success response from the provider.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The provider answered but the reply carried no usable text.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    /// Local failure while preparing the request (e.g. reading a file).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GenerationError {
    /// Returns a suggested HTTP status code for this error.
    #[must_use]
    pub const fn suggested_status_code(&self) -> u16 {
        match self {
            Self::Unavailable(_) => 503,
            Self::Upstream(_) | Self::InvalidResponse(_) => 502,
            Self::Internal(_) => 500,
        }
    }
}

/// Port for the external generative-content client.
///
/// Implementations perform no caching; whether they retry is their own
/// concern, the pipeline calls `generate` exactly once per request.
#[async_trait]
pub trait GenerationPort: Send + Sync + fmt::Debug {
    /// Generate text for `prompt` with `model`.
    ///
    /// `files` is `None` when the request carried no images, otherwise a
    /// non-empty list of readable file paths in request order.
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        files: Option<&[PathBuf]>,
    ) -> Result<GeneratedContent, GenerationError>;
}
