//! Content normalization.
//!
//! Converts either inbound shape into a [`CanonicalPrompt`] plus the image
//! references found along the way. All functions here are pure.

use tracing::debug;

use crate::contracts::{ChatMessage, ContentPart, MessageContent};
use crate::domain::{CanonicalMessage, CanonicalPrompt, MessageRole, RawImageRef};
use crate::error::GatewayError;

const TEXT_PART: &str = "text";
const IMAGE_URL_PART: &str = "image_url";

/// A normalized request: the prompt and the images to resolve, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub prompt: CanonicalPrompt,
    pub images: Vec<RawImageRef>,
}

/// Normalize a native request: the message is the prompt, verbatim.
pub fn normalize_native(
    message: &str,
    files: &[RawImageRef],
) -> Result<NormalizedRequest, GatewayError> {
    let prompt = CanonicalPrompt::Plain(message.to_string());
    if prompt.is_empty() {
        return Err(GatewayError::EmptyPrompt);
    }
    Ok(NormalizedRequest {
        prompt,
        images: files.to_vec(),
    })
}

/// Normalize an OpenAI-compatible message list.
///
/// Messages with an unrecognized role are dropped together with their
/// images. Image parts are collected separately and never merged into text.
pub fn normalize_messages(messages: &[ChatMessage]) -> Result<NormalizedRequest, GatewayError> {
    if messages.is_empty() {
        return Err(GatewayError::NoMessages);
    }

    let mut canonical = Vec::with_capacity(messages.len());
    let mut images = Vec::new();

    for message in messages {
        let Some(role) = MessageRole::parse(&message.role) else {
            debug!(role = %message.role, "Dropping message with unrecognized role");
            continue;
        };
        let Some(content) = &message.content else {
            continue;
        };

        let text = match content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => {
                let (text, part_images) = flatten_parts(parts);
                images.extend(part_images);
                text
            }
        };
        canonical.push(CanonicalMessage::new(role, text));
    }

    let prompt = CanonicalPrompt::conversation(canonical);
    if prompt.is_empty() {
        return Err(GatewayError::EmptyPrompt);
    }

    Ok(NormalizedRequest { prompt, images })
}

/// Split content parts into joined text and image references.
///
/// Text parts are joined with a single space. Parts of any other type are
/// ignored, as are text parts without text and image parts without a URL.
#[must_use]
pub fn flatten_parts(parts: &[ContentPart]) -> (String, Vec<RawImageRef>) {
    let mut texts: Vec<&str> = Vec::new();
    let mut images = Vec::new();

    for part in parts {
        match part.kind.as_str() {
            TEXT_PART => {
                if let Some(text) = part.text.as_deref().filter(|t| !t.is_empty()) {
                    texts.push(text);
                }
            }
            IMAGE_URL_PART => {
                if let Some(image) = part.image_url.as_ref().filter(|i| !i.as_str().is_empty()) {
                    images.push(image.clone());
                }
            }
            other => debug!(part_type = %other, "Ignoring unsupported content part"),
        }
    }

    (texts.join(" "), images)
}
