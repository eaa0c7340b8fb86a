//! Wire contracts for the two inbound request formats.
//!
//! These are the serde shapes of the native and OpenAI-compatible
//! requests and responses. They are shared between the HTTP adapter and
//! the CLI, and consumed by the services in [`crate::services`].

pub mod native;
pub mod openai;

pub use native::{NativeRequest, NativeResponse};
pub use openai::{
    AssistantMessage, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ContentPart, MessageContent, ModelEntry, ModelsResponse, Usage,
};
