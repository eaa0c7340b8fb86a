//! HTTP handlers.
//!
//! Request bodies are taken as raw bytes and parsed here, so malformed JSON
//! produces the same error body as every other failure.

pub mod chat;
pub mod gemini;

use axum::Json;
use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::error;

use crate::error::HttpError;

/// Health check endpoint.
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Parse a JSON request body.
pub(crate) fn parse_body<T: DeserializeOwned>(path: &str, body: &Bytes) -> Result<T, HttpError> {
    serde_json::from_slice(body).map_err(|e| {
        error!(path, error = %e, "Invalid request body");
        HttpError::from(e)
    })
}
