//! Public configuration for the Gemini client.

use std::fmt;
use std::time::Duration;

/// Default REST base URL, without a trailing slash.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for one `generateContent` call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the Gemini client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use gemgate_gemini::GeminiClientConfig;
/// use std::time::Duration;
///
/// let config = GeminiClientConfig::new()
///     .with_api_key("secret")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Clone)]
pub struct GeminiClientConfig {
    /// Base URL for the Gemini REST API
    pub(crate) base_url: String,
    /// API key sent as `x-goog-api-key`
    pub(crate) api_key: Option<String>,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_GENERATION_TIMEOUT,
            user_agent: concat!("gemgate/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for GeminiClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GeminiClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL. A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional API key. Blank keys count as absent.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 120 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whether an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL for `generateContent` on `model`.
    pub(crate) fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.user_agent.starts_with("gemgate/"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeminiClientConfig::new()
            .with_base_url("http://127.0.0.1:9000/v1beta/")
            .with_api_key("secret")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent");

        assert_eq!(config.base_url(), "http://127.0.0.1:9000/v1beta");
        assert!(config.has_api_key());
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(
            config.generate_url("gemini-2.5-flash"),
            "http://127.0.0.1:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_blank_optional_key_is_absent() {
        assert!(!GeminiClientConfig::new()
            .with_optional_api_key(Some("  ".to_string()))
            .has_api_key());
        assert!(GeminiClientConfig::new()
            .with_optional_api_key(Some("k".to_string()))
            .has_api_key());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiClientConfig::new().with_api_key("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
