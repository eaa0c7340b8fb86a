#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod contracts;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use contracts::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, MessageContent,
    ModelsResponse, NativeRequest, NativeResponse,
};
pub use domain::{
    CanonicalMessage, CanonicalPrompt, EphemeralFile, GeminiModel, ImageReference, MessageRole,
    RawImageRef, ResolutionBatch, ResolvedFile,
};
pub use error::{GatewayError, ImageResolutionError, ResolutionCause};
pub use ports::{
    FetchError, GeneratedContent, GenerationError, GenerationPort, RemoteFetchPort,
};
pub use services::{ChatService, ImageResolver, ResolverConfig};
