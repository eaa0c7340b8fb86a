//! Response shaping.
//!
//! Wraps generated text in the envelope of the entry point that received
//! the request.

use chrono::Utc;

use crate::contracts::{
    AssistantMessage, ChatChoice, ChatCompletionResponse, NativeResponse, Usage,
};
use crate::domain::{GeminiModel, MessageRole};

const COMPLETION_OBJECT: &str = "chat.completion";
const CHUNK_OBJECT: &str = "chat.completion.chunk";
const FINISH_STOP: &str = "stop";

/// Which inbound surface a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Native,
    OpenAi { stream: bool },
}

/// A response ready for serialization.
#[derive(Debug, Clone)]
pub enum ShapedResponse {
    Native(NativeResponse),
    OpenAi(ChatCompletionResponse),
}

/// Shape `text` for `entry`.
#[must_use]
pub fn shape(entry: EntryPoint, text: String, model: GeminiModel) -> ShapedResponse {
    match entry {
        EntryPoint::Native => ShapedResponse::Native(native_response(text)),
        EntryPoint::OpenAi { stream } => {
            ShapedResponse::OpenAi(chat_completion(text, model, stream))
        }
    }
}

#[must_use]
pub const fn native_response(text: String) -> NativeResponse {
    NativeResponse { response: text }
}

/// Build a chat-completion envelope stamped with the current time.
#[must_use]
pub fn chat_completion(text: String, model: GeminiModel, stream: bool) -> ChatCompletionResponse {
    chat_completion_at(text, model, stream, Utc::now().timestamp())
}

/// Build a chat-completion envelope for a fixed `created` timestamp.
///
/// A requested stream only changes the `object` tag; the body is always a
/// single complete envelope.
#[must_use]
pub fn chat_completion_at(
    text: String,
    model: GeminiModel,
    stream: bool,
    created: i64,
) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: format!("chatcmpl-{created}"),
        object: if stream { CHUNK_OBJECT } else { COMPLETION_OBJECT }.to_string(),
        created,
        model: model.as_str().to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: AssistantMessage {
                role: MessageRole::Assistant,
                content: text,
            },
            finish_reason: FINISH_STOP.to_string(),
        }],
        usage: Usage::default(),
    }
}
