//! Runtime configuration types for chatmate.
//!
//! `ChatConfig` represents the optional `config.toml` that tunes the model
//! call and the history window. Every field has a default, so an empty or
//! missing file yields the stock English-practice bot.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Maximum output tokens per completion.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Number of most recent user/assistant messages kept besides the system message.
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Base URL of the OpenAI chat completions API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// System message anchoring the assistant as an English conversation partner.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful English conversation partner. \
Always respond in English with proper grammar and maintain a friendly, conversational tone. \
Help users practice English while having natural conversations.";

/// Top-level configuration for a chat session.
///
/// Loaded from `~/.chatmate/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum number of output tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (0.0 - 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// How many user/assistant messages history retains.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Base URL of the chat completions endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Content of the system message.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            history_window: default_history_window(),
            base_url: default_base_url(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl ChatConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "model",
                reason: "must not be empty".to_string(),
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_tokens",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                key: "temperature",
                reason: format!("must be between 0.0 and 2.0, got {}", self.temperature),
            });
        }
        if self.system_prompt.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "system_prompt",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// System prompt for a session, mentioning the learner's name when known.
    pub fn system_prompt_for(&self, learner_name: Option<&str>) -> String {
        match learner_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => format!("{} The user's name is {name}.", self.system_prompt),
            None => self.system_prompt.clone(),
        }
    }
}
