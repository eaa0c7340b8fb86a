//! Native generation endpoint.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use gemgate_core::{NativeRequest, NativeResponse};
use tracing::{error, info};

use super::parse_body;
use crate::error::HttpError;
use crate::state::AppState;

// ── POST /gemini ───────────────────────────────────────────────────────

pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<NativeResponse>, HttpError> {
    let request: NativeRequest = parse_body("/gemini", &body)?;

    info!(
        model = %request.model,
        files = request.files().len(),
        "POST /gemini"
    );

    match state.chat.generate_native(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!(model = %request.model, error = %e, "Native generation failed");
            Err(e.into())
        }
    }
}
