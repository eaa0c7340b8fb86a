//! OpenAI API data models for request/response handling.
//!
//! This module contains types that match the OpenAI chat-completions wire
//! format. Domain types live in [`crate::domain`]; this module handles the
//! API layer shape.

use serde::{Deserialize, Serialize};

use crate::domain::{GeminiModel, MessageRole, RawImageRef};

// =============================================================================
// Chat Completion Request Types
// =============================================================================

/// Request to /v1/chat/completions endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Array of chat messages.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Model to use. Required by the pipeline, optional on the wire.
    #[serde(default)]
    pub model: Option<GeminiModel>,
    /// Whether the caller asked for a stream.
    #[serde(default)]
    pub stream: Option<bool>,
}

impl ChatCompletionRequest {
    /// Streaming flag, `false` when absent or null.
    #[must_use]
    pub fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant". Other roles are dropped.
    #[serde(default = "default_role")]
    pub role: String,
    /// Message content: plain text or an array of content parts.
    #[serde(default)]
    pub content: Option<MessageContent>,
}

fn default_role() -> String {
    MessageRole::User.as_str().to_string()
}

impl ChatMessage {
    #[must_use]
    pub fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(MessageContent::Text(text.into())),
        }
    }

    #[must_use]
    pub fn parts(role: &str, parts: Vec<ContentPart>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(MessageContent::Parts(parts)),
        }
    }
}

/// Message content in either of its two wire shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain string content.
    Text(String),
    /// Mixed text / image parts (OpenAI vision format).
    Parts(Vec<ContentPart>),
}

/// One typed content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    /// "text" or "image_url"; anything else is ignored.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Text content when type is "text".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image reference when type is "image_url".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<RawImageRef>,
}

impl ContentPart {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
            image_url: None,
        }
    }

    #[must_use]
    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            kind: "image_url".to_string(),
            text: None,
            image_url: Some(RawImageRef::Object { url: url.into() }),
        }
    }
}

// =============================================================================
// Chat Completion Response Types
// =============================================================================

/// Non-streaming chat completion envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Synthetic identifier derived from the current time.
    pub id: String,
    /// "chat.completion", or "chat.completion.chunk" when a stream was requested.
    pub object: String,
    /// Unix timestamp (seconds).
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: String,
}

/// The generated reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Token usage. Token accounting is not implemented; all counts are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// =============================================================================
// Models Response Types
// =============================================================================

/// Response for /v1/models endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Always "list".
    pub object: String,
    pub data: Vec<ModelEntry>,
}

/// A single model entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    /// Always "model".
    pub object: String,
    pub owned_by: String,
}

impl ModelsResponse {
    /// List every supported model.
    #[must_use]
    pub fn supported() -> Self {
        Self {
            object: "list".to_string(),
            data: GeminiModel::ALL
                .iter()
                .map(|m| ModelEntry {
                    id: m.as_str().to_string(),
                    object: "model".to_string(),
                    owned_by: "google".to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_part_contents() {
        let req: ChatCompletionRequest = serde_json::from_str(
            r#"{
                "model": "gemini-2.5-pro",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": [
                        {"type": "text", "text": "describe"},
                        {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,AAAA"}},
                        {"type": "image_url", "image_url": "https://x/y.png"}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(req.model, Some(GeminiModel::Pro25));
        assert!(!req.is_stream());
        assert_eq!(
            req.messages[0].content,
            Some(MessageContent::Text("be brief".to_string()))
        );
        let Some(MessageContent::Parts(parts)) = &req.messages[1].content else {
            panic!("expected content parts");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[1].image_url.as_ref().map(RawImageRef::as_str),
            Some("data:image/jpeg;base64,AAAA")
        );
        assert_eq!(
            parts[2].image_url.as_ref().map(RawImageRef::as_str),
            Some("https://x/y.png")
        );
    }

    #[test]
    fn missing_role_defaults_to_user_and_null_stream_is_false() {
        let req: ChatCompletionRequest =
            serde_json::from_str(r#"{"messages":[{"content":"hi"}],"stream":null}"#).unwrap();
        assert_eq!(req.messages[0].role, "user");
        assert!(req.model.is_none());
        assert!(!req.is_stream());
    }

    #[test]
    fn image_url_object_ignores_extra_fields() {
        let part: ContentPart = serde_json::from_str(
            r#"{"type":"image_url","image_url":{"url":"https://x/y.png","detail":"high"}}"#,
        )
        .unwrap();
        assert_eq!(
            part.image_url.as_ref().map(RawImageRef::as_str),
            Some("https://x/y.png")
        );
    }

    #[test]
    fn models_response_lists_all_supported_models() {
        let models = ModelsResponse::supported();
        assert_eq!(models.object, "list");
        let ids: Vec<&str> = models.data.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["gemini-3.0-pro", "gemini-2.5-pro", "gemini-2.5-flash"]
        );
    }
}
