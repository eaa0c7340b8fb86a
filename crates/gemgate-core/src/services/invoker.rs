//! Generation invocation.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{CanonicalPrompt, GeminiModel, ResolutionBatch};
use crate::error::GatewayError;
use crate::ports::{GeneratedContent, GenerationPort};

/// Calls the generation backend exactly once per request.
#[derive(Debug, Clone)]
pub struct GenerationInvoker {
    client: Arc<dyn GenerationPort>,
}

impl GenerationInvoker {
    pub fn new(client: Arc<dyn GenerationPort>) -> Self {
        Self { client }
    }

    /// Generate text for the rendered prompt and the resolved files.
    ///
    /// The backend receives `None` rather than an empty list when there are
    /// no files.
    pub async fn invoke(
        &self,
        prompt: &CanonicalPrompt,
        model: GeminiModel,
        files: &ResolutionBatch,
    ) -> Result<GeneratedContent, GatewayError> {
        let rendered = prompt.render();
        let paths: Vec<PathBuf> = files.paths();
        let files = (!paths.is_empty()).then_some(paths.as_slice());

        debug!(
            model = %model,
            prompt_chars = rendered.chars().count(),
            files = paths.len(),
            "Invoking generation backend"
        );

        Ok(self.client.generate(&rendered, model.as_str(), files).await?)
    }
}

/// Fail with [`GatewayError::ModelRequired`] when no model was supplied.
pub const fn require_model(model: Option<GeminiModel>) -> Result<GeminiModel, GatewayError> {
    match model {
        Some(model) => Ok(model),
        None => Err(GatewayError::ModelRequired),
    }
}
