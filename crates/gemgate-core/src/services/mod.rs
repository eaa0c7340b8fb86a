//! Core services - the request pipeline.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete HTTP clients or frameworks.

mod chat_service;
mod image_resolver;
mod invoker;
mod normalizer;
mod shaper;

pub use chat_service::ChatService;
pub use image_resolver::{DEFAULT_FETCH_TIMEOUT, ImageResolver, ResolverConfig, decode_base64};
pub use invoker::{GenerationInvoker, require_model};
pub use normalizer::{NormalizedRequest, flatten_parts, normalize_messages, normalize_native};
pub use shaper::{
    EntryPoint, ShapedResponse, chat_completion, chat_completion_at, native_response, shape,
};
