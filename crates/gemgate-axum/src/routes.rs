//! Route definitions and router construction.

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Create the main Axum router with all routes, CORS, and request tracing.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/gemini", post(handlers::gemini::generate))
        .route(
            "/v1/chat/completions",
            post(handlers::chat::completions),
        )
        .route("/v1/models", get(handlers::chat::list_models))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
