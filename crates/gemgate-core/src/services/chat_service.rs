//! Chat service: the full request pipeline for both entry points.
//!
//! normalize → resolve images → generate → shape → clean up.

use std::sync::Arc;

use tracing::{debug, info};

use super::image_resolver::{ImageResolver, ResolverConfig};
use super::invoker::{GenerationInvoker, require_model};
use super::normalizer::{NormalizedRequest, normalize_messages, normalize_native};
use super::shaper::{chat_completion, native_response};
use crate::contracts::{
    ChatCompletionRequest, ChatCompletionResponse, NativeRequest, NativeResponse,
};
use crate::domain::GeminiModel;
use crate::error::GatewayError;
use crate::ports::{GenerationPort, RemoteFetchPort};

/// Orchestrates one request from inbound contract to outbound contract.
///
/// Temp files created while resolving images are removed before either
/// method returns, on success and on failure alike. If the future is
/// dropped mid-flight, the batch guard removes them instead.
#[derive(Debug, Clone)]
pub struct ChatService {
    resolver: ImageResolver,
    invoker: GenerationInvoker,
}

impl ChatService {
    pub fn new(
        generation: Arc<dyn GenerationPort>,
        fetcher: Arc<dyn RemoteFetchPort>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            resolver: ImageResolver::new(fetcher, config),
            invoker: GenerationInvoker::new(generation),
        }
    }

    #[must_use]
    pub const fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    /// Handle a native request.
    pub async fn generate_native(
        &self,
        request: &NativeRequest,
    ) -> Result<NativeResponse, GatewayError> {
        let normalized = normalize_native(&request.message, request.files())?;
        let text = self.run(normalized, request.model).await?;
        Ok(native_response(text))
    }

    /// Handle an OpenAI-compatible chat-completion request.
    pub async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, GatewayError> {
        let normalized = normalize_messages(&request.messages)?;
        let model = require_model(request.model)?;
        let text = self.run(normalized, model).await?;
        Ok(chat_completion(text, model, request.is_stream()))
    }

    async fn run(
        &self,
        normalized: NormalizedRequest,
        model: GeminiModel,
    ) -> Result<String, GatewayError> {
        let NormalizedRequest { prompt, images } = normalized;
        debug!(
            messages = prompt.message_count(),
            images = images.len(),
            model = %model,
            "Normalized request"
        );

        let batch = self.resolver.resolve_all(&images).await?;
        let result = self.invoker.invoke(&prompt, model, &batch).await;

        let removed = batch.cleanup();
        if removed > 0 {
            debug!(removed, "Removed temp image files");
        }

        let content = result?;
        info!(
            model = %model,
            response_chars = content.text.chars().count(),
            "Generation complete"
        );
        Ok(content.text)
    }
}
