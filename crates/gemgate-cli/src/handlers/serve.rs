//! Serve command handler.
//!
//! Starts the HTTP gateway.

use anyhow::Result;
use gemgate_axum::{CorsConfig, ServerConfig, start_server};

use crate::commands::ServeArgs;

/// Translate CLI arguments into the server configuration.
pub fn server_config(args: &ServeArgs) -> ServerConfig {
    let cors = match &args.allowed_origins {
        Some(origins) if !origins.is_empty() => CorsConfig::AllowOrigins(origins.clone()),
        _ => CorsConfig::AllowAll,
    };
    ServerConfig {
        host: args.host.clone(),
        port: args.port,
        cors,
        gemini: args.service.gemini_config(),
        resolver: args.service.resolver_config(),
    }
}

/// Execute the serve command. Runs until Ctrl-C.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    start_server(server_config(args)).await
}
