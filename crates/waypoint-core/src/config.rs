//! Language model endpoint configuration.

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for an OpenAI-compatible chat completions endpoint.
///
/// A missing or blank API key means the model-backed parser is never
/// attempted and plan text always goes through the heuristic extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl ModelConfig {
    /// Whether a credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Full URL of the chat completions endpoint.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::config::ModelConfig;
    ///
    /// let config = ModelConfig {
    ///     base_url: Some("http://localhost:11434/v1/".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(config.chat_endpoint(), "http://localhost:11434/v1/chat/completions");
    /// ```
    pub fn chat_endpoint(&self) -> String {
        let base = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_not_configured() {
        let mut config = ModelConfig::default();
        assert!(!config.is_configured());

        config.api_key = Some("   ".into());
        assert!(!config.is_configured());

        config.api_key = Some("sk-test".into());
        assert!(config.is_configured());
    }

    #[test]
    fn test_default_endpoint() {
        assert_eq!(
            ModelConfig::default().chat_endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
