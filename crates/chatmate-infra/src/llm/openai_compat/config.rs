//! Configuration for OpenAI-compatible providers.
//!
//! [`openai_defaults`] returns the configuration for the hosted OpenAI API;
//! [`OpenAiCompatConfig::with_base_url`] points the same protocol at another
//! compatible endpoint.

use secrecy::SecretString;

use chatmate_types::config::DEFAULT_BASE_URL;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Override the base URL. Trailing slashes are stripped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: DEFAULT_BASE_URL.into(),
        api_key,
        model: model.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(SecretString::from("sk-test".to_string()), "gpt-4o-mini");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key.expose_secret(), "sk-test");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = openai_defaults(SecretString::from("sk-test".to_string()), "gpt-4o-mini")
            .with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }
}
