//! Error taxonomy for the request pipeline.
//!
//! Adapters map [`GatewayError`] to their own error types (HTTP status
//! codes, CLI exit codes).

use thiserror::Error;

use crate::ports::{FetchError, GenerationError};

/// Why a single image reference could not be resolved.
#[derive(Debug, Error)]
pub enum ResolutionCause {
    /// Malformed data URI or base64 payload.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The remote image could not be downloaded.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A local path that does not exist.
    #[error("local file not found")]
    NotFound,

    /// The temp file could not be written.
    #[error("temp file error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolutionCause {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode_failed",
            Self::Fetch(_) => "fetch_failed",
            Self::NotFound => "not_found",
            Self::Io(_) => "io_error",
        }
    }

    /// Whether the failure stems from bad caller input rather than an
    /// upstream or local fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::NotFound)
    }
}

/// Resolution failure for one reference of a batch.
#[derive(Debug, Error)]
#[error("Failed to process image '{reference}': {cause}")]
pub struct ImageResolutionError {
    /// The offending reference, shortened for data URIs.
    pub reference: String,
    #[source]
    pub cause: ResolutionCause,
}

impl ImageResolutionError {
    #[must_use]
    pub fn new(reference: &str, cause: ResolutionCause) -> Self {
        Self {
            reference: summarize_reference(reference),
            cause,
        }
    }
}

/// Data URIs can be megabytes long; keep only the header in errors and logs.
#[must_use]
pub fn summarize_reference(reference: &str) -> String {
    const MAX: usize = 96;
    if reference.starts_with("data:") {
        let header = reference.split(',').next().unwrap_or(reference);
        return format!("{header},...");
    }
    if reference.chars().count() > MAX {
        let head: String = reference.chars().take(MAX).collect();
        return format!("{head}...");
    }
    reference.to_string()
}

/// Request-level pipeline errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request carried no messages at all.
    #[error("No messages provided.")]
    NoMessages,

    /// Normalization left nothing to send.
    #[error("No valid messages found.")]
    EmptyPrompt,

    /// No model identifier was given where one is required.
    #[error("Model not specified in the request.")]
    ModelRequired,

    /// An image reference could not be resolved.
    #[error(transparent)]
    ImageResolution(#[from] ImageResolutionError),

    /// The generation backend failed.
    #[error("Error generating content: {0}")]
    Generation(#[from] GenerationError),
}

impl GatewayError {
    /// Returns true for errors caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::NoMessages | Self::EmptyPrompt | Self::ModelRequired => true,
            Self::ImageResolution(err) => err.cause.is_client_error(),
            Self::Generation(_) => false,
        }
    }
}
