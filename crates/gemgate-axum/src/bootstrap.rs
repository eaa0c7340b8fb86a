//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use gemgate_core::{ChatService, GenerationPort, RemoteFetchPort, ResolverConfig};
use gemgate_gemini::{GeminiClient, GeminiClientConfig, ReqwestFetcher};
use tracing::{info, warn};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Outbound Gemini client settings.
    pub gemini: GeminiClientConfig,
    /// Image resolution settings.
    pub resolver: ResolverConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors: CorsConfig::default(),
            gemini: GeminiClientConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    /// Address string to bind, `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
///
/// This struct holds all initialized services for the web server.
#[derive(Debug, Clone)]
pub struct AxumContext {
    /// Request pipeline shared by both inbound formats.
    pub chat: Arc<ChatService>,
}

impl AxumContext {
    /// Build a context from explicit ports.
    pub fn from_ports(
        generation: Arc<dyn GenerationPort>,
        fetcher: Arc<dyn RemoteFetchPort>,
        resolver: ResolverConfig,
    ) -> Self {
        Self {
            chat: Arc::new(ChatService::new(generation, fetcher, resolver)),
        }
    }
}

/// Bootstrap the Axum server with all services.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    if !config.gemini.has_api_key() {
        warn!("GEMINI_API_KEY is not set; generation requests will return 503");
    }

    let generation: Arc<dyn GenerationPort> = Arc::new(
        GeminiClient::new(config.gemini.clone()).context("failed to build Gemini client")?,
    );
    let fetcher: Arc<dyn RemoteFetchPort> = Arc::new(
        ReqwestFetcher::new(concat!("gemgate/", env!("CARGO_PKG_VERSION")))
            .context("failed to build image fetcher")?,
    );

    info!(
        target: "gemgate.bootstrap",
        base_url = config.gemini.base_url(),
        temp_dir = %config.resolver.temp_dir.display(),
        fetch_timeout_secs = config.resolver.fetch_timeout.as_secs(),
        "Axum bootstrap complete"
    );

    Ok(AxumContext::from_ports(
        generation,
        fetcher,
        config.resolver.clone(),
    ))
}

/// Start the web server and serve until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local: SocketAddr = listener.local_addr()?;

    info!("gemgate listening on http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
