//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core pipeline expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No HTTP client or framework types in any signature
//! - Adapters own retries, auth, and transport configuration
//! - Errors are domain enums; adapters map their own failures into them

pub mod generation;
pub mod remote_fetch;

pub use generation::{GeneratedContent, GenerationError, GenerationPort};
pub use remote_fetch::{FetchError, RemoteFetchPort};
