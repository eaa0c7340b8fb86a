//! Native ("Gemini-style") request and response.

use serde::{Deserialize, Serialize};

use crate::domain::{GeminiModel, RawImageRef};

/// Request to the native generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeRequest {
    /// The prompt, sent verbatim.
    pub message: String,
    /// Model to use. Defaults to the fast tier.
    #[serde(default)]
    pub model: GeminiModel,
    /// Image references: URLs, data URIs, or local paths.
    #[serde(default)]
    pub files: Option<Vec<RawImageRef>>,
}

impl NativeRequest {
    #[must_use]
    pub fn new(message: impl Into<String>, model: GeminiModel) -> Self {
        Self {
            message: message.into(),
            model,
            files: None,
        }
    }

    #[must_use]
    pub fn with_files(mut self, files: Vec<RawImageRef>) -> Self {
        self.files = Some(files);
        self
    }

    /// Image references, empty when none were given.
    #[must_use]
    pub fn files(&self) -> &[RawImageRef] {
        self.files.as_deref().unwrap_or_default()
    }
}

/// Response of the native generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeResponse {
    pub response: String,
}
