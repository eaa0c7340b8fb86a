//! Command handlers.
//!
//! Handlers follow the same shape:
//! - Signature: `pub async fn execute(args: &...Args) -> Result<...>`
//! - Thin wrappers that translate CLI arguments into adapter configuration
//!   and delegate to the gateway services.

pub mod ask;
pub mod serve;
