//! Supported generation models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Model identifiers accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeminiModel {
    #[serde(rename = "gemini-3.0-pro")]
    Pro30,
    #[serde(rename = "gemini-2.5-pro")]
    Pro25,
    /// Fast tier, used when a native request names no model.
    #[default]
    #[serde(rename = "gemini-2.5-flash")]
    Flash25,
}

impl GeminiModel {
    /// Every supported model, newest first.
    pub const ALL: [Self; 3] = [Self::Pro30, Self::Pro25, Self::Flash25];

    /// Wire identifier of the model.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pro30 => "gemini-3.0-pro",
            Self::Pro25 => "gemini-2.5-pro",
            Self::Flash25 => "gemini-2.5-flash",
        }
    }

    /// Parse an exact model identifier.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl std::fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeminiModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let supported: Vec<&str> = Self::ALL.iter().map(Self::as_str).collect();
            format!(
                "Unsupported model '{s}'. Supported models: {}",
                supported.join(", ")
            )
        })
    }
}
