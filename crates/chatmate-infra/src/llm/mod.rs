//! LLM provider implementations for chatmate.
//!
//! - `openai_compat`: provider for any OpenAI chat-completions compatible API
//!
//! [`initialize_client`] is the startup entry point: it resolves the API key
//! and returns a ready [`CompletionClient`].

pub mod openai_compat;

use tracing::info;

use chatmate_core::chat::client::{CompletionClient, CompletionParams};
use chatmate_types::config::ChatConfig;
use chatmate_types::error::ConfigError;

use crate::secret::{OPENAI_API_KEY, SecretProvider};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::openai_defaults;

/// Resolve the OpenAI credential and build the completion client.
///
/// Fails with [`ConfigError::MissingCredential`] when `OPENAI_API_KEY` is
/// unset or empty. No network traffic happens here.
pub fn initialize_client(
    config: &ChatConfig,
    secrets: &impl SecretProvider,
) -> Result<CompletionClient<OpenAiCompatibleProvider>, ConfigError> {
    let api_key = secrets.require(OPENAI_API_KEY)?;

    let provider_config = openai_defaults(api_key, &config.model).with_base_url(&config.base_url);
    info!(
        provider = %provider_config.provider_name,
        base_url = %provider_config.base_url,
        model = %config.model,
        "Completion client configured"
    );

    let provider = OpenAiCompatibleProvider::new(provider_config);
    Ok(CompletionClient::new(provider, CompletionParams::from(config)))
}
