#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod fetch;
mod wire;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::GeminiClient;
pub use fetch::ReqwestFetcher;

// Configuration
pub use config::{DEFAULT_BASE_URL, DEFAULT_GENERATION_TIMEOUT, GeminiClientConfig};

// Errors
pub use error::{GeminiError, GeminiResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tempfile as _;
