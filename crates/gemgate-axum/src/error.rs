//! Axum-specific error types and mappings.
//!
//! Maps [`GatewayError`] to HTTP status codes and OpenAI-style error bodies.
//! Both entry points share the same error shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gemgate_core::{GatewayError, GenerationError, ResolutionCause};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An upstream service (image host, generation API) failed.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Service unavailable (e.g., generation backend not configured).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error type discriminant for client-side handling.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "invalid_request",
            Self::BadGateway(_) => "upstream_error",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "server_error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg)
            | Self::BadGateway(msg)
            | Self::ServiceUnavailable(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    message: &'a str,
    #[serde(rename = "type")]
    error_type: &'static str,
    code: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: ErrorDetail {
                message: self.message(),
                error_type: self.error_type(),
                code: status.as_u16(),
            },
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<GatewayError> for HttpError {
    fn from(err: GatewayError) -> Self {
        let message = err.to_string();
        match err {
            GatewayError::NoMessages | GatewayError::EmptyPrompt | GatewayError::ModelRequired => {
                Self::BadRequest(message)
            }
            GatewayError::ImageResolution(resolution) => match resolution.cause {
                ResolutionCause::Decode(_) | ResolutionCause::NotFound => Self::BadRequest(message),
                ResolutionCause::Fetch(_) => Self::BadGateway(message),
                ResolutionCause::Io(_) => Self::Internal(message),
            },
            GatewayError::Generation(generation) => match generation {
                GenerationError::Unavailable(_) => Self::ServiceUnavailable(message),
                GenerationError::Upstream(_) | GenerationError::InvalidResponse(_) => {
                    Self::BadGateway(message)
                }
                GenerationError::Internal(_) => Self::Internal(message),
            },
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("Invalid request body: {err}"))
    }
}
