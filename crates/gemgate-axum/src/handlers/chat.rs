//! OpenAI-compatible endpoints.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use gemgate_core::{ChatCompletionRequest, ChatCompletionResponse, ModelsResponse};
use tracing::{error, info};

use super::parse_body;
use crate::error::HttpError;
use crate::state::AppState;

// ── POST /v1/chat/completions ──────────────────────────────────────────

pub async fn completions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatCompletionResponse>, HttpError> {
    let request: ChatCompletionRequest = parse_body("/v1/chat/completions", &body)?;
    let model = request.model.map(|m| m.as_str());

    info!(
        model,
        messages = request.messages.len(),
        stream = request.is_stream(),
        "POST /v1/chat/completions"
    );

    match state.chat.complete_chat(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!(model, error = %e, "Chat completion failed");
            Err(e.into())
        }
    }
}

// ── GET /v1/models ─────────────────────────────────────────────────────

pub async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse::supported())
}
