use crate::error::{MemeError, Result};
use std::time::Duration;

/// Default instruction sent to the vision model.
///
/// The two-line response format is the contract the caption parser enforces;
/// it is requested here by prompting only, not by a machine-checked schema.
pub const DEFAULT_MEME_PROMPT: &str = "I want you to create a funny meme out of this picture. \
Please give me the captions (as top and bottom text) for the meme (don't say anything else, \
respond as {top text} new line char {bottom text}, don't add labels like top or bottom text, \
no NSFW words, and don't add quotes)";

/// Configuration for an OpenAI-compatible API client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base URL (e.g., "https://api.openai.com").
    pub endpoint: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Vision/chat model name (e.g., "gpt-4o").
    pub model: String,
    /// Per-request timeout (default: 120s).
    pub timeout: Duration,
    /// Completion token cap — keeps captions short (default: 100).
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            timeout: Duration::from_secs(120),
            max_tokens: 100,
        }
    }
}

impl OpenAiConfig {
    /// Create a config with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Build a config from the environment.
    ///
    /// Reads `OPENAI_API_KEY` (required) and `OPENAI_BASE_URL` (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| MemeError::Config("OPENAI_API_KEY is not set".to_string()))?;
        let mut config = Self::with_api_key(api_key);
        if let Ok(endpoint) = std::env::var("OPENAI_BASE_URL") {
            config.endpoint = endpoint;
        }
        Ok(config)
    }

    /// Set the API base URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the completion token cap.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Base URL with any trailing slash removed.
    pub(crate) fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

/// Options controlling caption generation.
#[derive(Debug, Clone, Default)]
pub struct CaptionOptions {
    /// Custom instruction (overrides [`DEFAULT_MEME_PROMPT`]).
    pub prompt: Option<String>,
}

/// Options controlling image generation.
#[derive(Debug, Clone)]
pub struct ImageGenOptions {
    /// Model override; `None` uses the image-generation default.
    pub model: Option<String>,
    /// Output size (e.g., "1024x1024").
    pub size: String,
}

impl Default for ImageGenOptions {
    fn default() -> Self {
        Self {
            model: None,
            size: "1024x1024".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OpenAiConfig::default();
        assert_eq!(config.endpoint, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 100);
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn config_builder() {
        let config = OpenAiConfig::with_api_key("sk-test")
            .endpoint("http://localhost:8080/")
            .model("gpt-4o-mini")
            .timeout(Duration::from_secs(30))
            .max_tokens(64);
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 64);
    }

    #[test]
    fn default_prompt_demands_two_lines() {
        assert!(DEFAULT_MEME_PROMPT.contains("top and bottom text"));
        assert!(DEFAULT_MEME_PROMPT.contains("new line char"));
    }
}
