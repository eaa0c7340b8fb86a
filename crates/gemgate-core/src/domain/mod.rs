//! Domain types for the request pipeline.
//!
//! These types are pure data structures with minimal logic.
//! They represent the canonical prompt and the image files of a request.

pub mod chat;
pub mod image;
pub mod model;

pub use chat::{CanonicalMessage, CanonicalPrompt, MessageRole};
pub use image::{
    DEFAULT_IMAGE_EXTENSION, EphemeralFile, ImageReference, RawImageRef, ResolutionBatch,
    ResolvedFile,
};
pub use model::GeminiModel;
