#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary in main.rs
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod parser;

pub use commands::{AskArgs, Commands, ServeArgs};
pub use config::ServiceArgs;
pub use error::CliError;
pub use parser::Cli;
