//! Gemini REST wire types for `generateContent`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// One user turn with the given parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Standard base64.
    pub data: String,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

/// Only text is read back; other part kinds deserialize with `text: None`.
#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any text exists.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }

    /// Why there is no text, for error reporting.
    pub fn missing_text_reason(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("prompt blocked: {reason}");
        }
        match self.candidates.first() {
            None => "response contained no candidates".to_string(),
            Some(candidate) => match candidate.finish_reason.as_deref() {
                Some(reason) => format!("candidate has no text (finish reason {reason})"),
                None => "candidate has no text".to_string(),
            },
        }
    }
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// Best-effort message from an error body.
pub fn error_message(body: &str) -> String {
    const MAX: usize = 512;
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.chars().take(MAX).collect(),
    }
}
