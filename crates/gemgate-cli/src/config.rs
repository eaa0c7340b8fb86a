//! Shared configuration arguments.
//!
//! Options common to every command that talks to the generation backend,
//! with conversion into the adapter configuration types.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use gemgate_core::ResolverConfig;
use gemgate_gemini::{DEFAULT_BASE_URL, GeminiClientConfig};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Generation backend and image resolution options.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Gemini API key
    #[arg(long = "api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini REST base URL
    #[arg(long = "base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout for each remote image download, in seconds
    #[arg(long = "image-timeout-secs", default_value_t = 30)]
    pub image_timeout_secs: u64,

    /// Timeout for each generation request, in seconds
    #[arg(long = "generation-timeout-secs", default_value_t = 120)]
    pub generation_timeout_secs: u64,

    /// Directory for temporary image files (defaults to the system temp dir)
    #[arg(long = "temp-dir")]
    pub temp_dir: Option<PathBuf>,
}

impl ServiceArgs {
    /// Build the Gemini client configuration.
    #[must_use]
    pub fn gemini_config(&self) -> GeminiClientConfig {
        GeminiClientConfig::new()
            .with_base_url(self.base_url.clone())
            .with_optional_api_key(self.api_key.clone())
            .with_timeout(Duration::from_secs(self.generation_timeout_secs))
    }

    /// Build the image resolver configuration.
    #[must_use]
    pub fn resolver_config(&self) -> ResolverConfig {
        let config =
            ResolverConfig::new().with_fetch_timeout(Duration::from_secs(self.image_timeout_secs));
        match &self.temp_dir {
            Some(dir) => config.with_temp_dir(dir),
            None => config,
        }
    }
}
