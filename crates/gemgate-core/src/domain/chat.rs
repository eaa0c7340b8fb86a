//! Chat domain types.
//!
//! These types represent the canonical, format-independent prompt that is
//! sent to the generation backend, independent of any wire format.

use serde::{Deserialize, Serialize};

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Parse a role from a string.
    ///
    /// Only the three recognized roles parse; anything else (including
    /// `"tool"` or a differently-cased spelling) yields `None` and the
    /// message carrying it is dropped by the normalizer.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Label used when rendering the role into a prompt line.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single normalized message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMessage {
    pub role: MessageRole,
    pub text: String,
}

impl CanonicalMessage {
    #[must_use]
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Render as a `"{Role}: {text}"` line.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.text)
    }
}

/// The prompt handed to the generation backend.
///
/// A native request carries its message verbatim; an OpenAI-compatible
/// request is linearized into role-labelled lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalPrompt {
    /// A single message string, sent as-is.
    Plain(String),
    /// Ordered role-labelled messages. Empty-text messages are never stored.
    Conversation(Vec<CanonicalMessage>),
}

impl CanonicalPrompt {
    /// Build a conversation prompt, dropping messages with empty text.
    #[must_use]
    pub fn conversation(messages: impl IntoIterator<Item = CanonicalMessage>) -> Self {
        Self::Conversation(
            messages
                .into_iter()
                .filter(|m| !m.text.is_empty())
                .collect(),
        )
    }

    /// Whether there is nothing to send downstream.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.trim().is_empty(),
            Self::Conversation(messages) => messages.is_empty(),
        }
    }

    /// Number of messages contributing to the prompt.
    #[must_use]
    pub fn message_count(&self) -> usize {
        match self {
            Self::Plain(text) => usize::from(!text.trim().is_empty()),
            Self::Conversation(messages) => messages.len(),
        }
    }

    /// Serialize to the single string sent to the generation backend.
    ///
    /// Conversation lines are joined with a blank line, in original order.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Conversation(messages) => messages
                .iter()
                .map(CanonicalMessage::render)
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}
