//! Gemini `generateContent` client.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use gemgate_core::{GeneratedContent, GenerationError, GenerationPort};
use tracing::{debug, warn};

use crate::config::GeminiClientConfig;
use crate::error::{GeminiError, GeminiResult};
use crate::wire::{self, GenerateContentRequest, GenerateContentResponse, InlineData, Part};

const API_KEY_HEADER: &str = "x-goog-api-key";
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Client for the Gemini REST API.
///
/// Sends one `generateContent` request per call. No retries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiClientConfig) -> GeminiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &GeminiClientConfig {
        &self.config
    }

    /// Generate text for `prompt`, attaching each file as inline image data.
    pub async fn generate_content(
        &self,
        prompt: &str,
        model: &str,
        files: &[PathBuf],
    ) -> GeminiResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;

        let mut parts = Vec::with_capacity(files.len() + 1);
        parts.push(Part::Text {
            text: prompt.to_string(),
        });
        for path in files {
            parts.push(inline_image(path).await?);
        }
        let request = GenerateContentRequest::user(parts);

        let url = self.config.generate_url(model);
        debug!(model, images = files.len(), "Sending generateContent request");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = wire::error_message(&body);
            warn!(status = status.as_u16(), model, %message, "Gemini API error");
            return Err(GeminiError::ApiRequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed.text().ok_or_else(|| GeminiError::InvalidResponse {
            message: parsed.missing_text_reason(),
        })
    }
}

/// Read `path` into an inline-data part.
async fn inline_image(path: &Path) -> GeminiResult<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| GeminiError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Part::InlineData {
        inline_data: InlineData {
            mime_type: image_mime_type(path),
            data: STANDARD.encode(bytes),
        },
    })
}

/// Guess an image MIME type from the file extension.
fn image_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .iter()
        .find(|m| m.type_() == mime_guess::mime::IMAGE)
        .map_or_else(|| FALLBACK_IMAGE_MIME.to_string(), |m| m.essence_str().to_string())
}

#[async_trait]
impl GenerationPort for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        files: Option<&[PathBuf]>,
    ) -> Result<GeneratedContent, GenerationError> {
        let text = self
            .generate_content(prompt, model, files.unwrap_or_default())
            .await?;
        Ok(GeneratedContent::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(image_mime_type(Path::new("/tmp/a.png")), "image/png");
        assert_eq!(image_mime_type(Path::new("/tmp/a.JPG")), "image/jpeg");
        assert_eq!(image_mime_type(Path::new("/tmp/a.webp")), "image/webp");
        assert_eq!(image_mime_type(Path::new("/tmp/a.txt")), "image/jpeg");
        assert_eq!(image_mime_type(Path::new("/tmp/noext")), "image/jpeg");
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        // Unroutable base URL: a request attempt would surface as a network error.
        let client = GeminiClient::new(
            GeminiClientConfig::new().with_base_url("http://127.0.0.1:1/v1beta"),
        )
        .unwrap();

        let err = client
            .generate("hi", "gemini-2.5-flash", None)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_internal() {
        let client = GeminiClient::new(GeminiClientConfig::new().with_api_key("k")).unwrap();
        let missing = [PathBuf::from("/definitely/not/here.png")];

        let err = client
            .generate("hi", "gemini-2.5-flash", Some(&missing))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Internal(_)));
    }
}
