//! Completion client for chatmate.
//!
//! `CompletionClient` builds a `CompletionRequest` from the conversation
//! history with fixed model parameters, sends it through an `LlmProvider`,
//! and returns the reply text. Every call is wrapped in a GenAI tracing span.
//!
//! Two surfaces are offered: [`CompletionClient::complete`] keeps the typed
//! [`LlmError`], while [`CompletionClient::reply`] collapses any failure into
//! a displayable string so the conversation always has a reply to show.

use tracing::{Instrument, debug, info_span, warn};

use chatmate_types::config::{ChatConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use chatmate_types::llm::{CompletionRequest, LlmError};

use crate::llm::provider::LlmProvider;

use super::history::ConversationHistory;

/// Prefix of the reply shown when a completion call fails.
pub const ERROR_REPLY_PREFIX: &str = "Error communicating with OpenAI: ";

/// Fixed parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl From<&ChatConfig> for CompletionParams {
    fn from(config: &ChatConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Render a failed completion as the reply the user sees.
pub fn error_reply(err: &LlmError) -> String {
    format!("{ERROR_REPLY_PREFIX}{err}")
}

/// Sends conversation history to an LLM provider and returns reply text.
pub struct CompletionClient<P> {
    provider: P,
    params: CompletionParams,
}

impl<P: LlmProvider> CompletionClient<P> {
    /// Create a client over `provider` with the given request parameters.
    pub fn new(provider: P, params: CompletionParams) -> Self {
        Self { provider, params }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn params(&self) -> &CompletionParams {
        &self.params
    }

    /// Request a completion for the full history.
    ///
    /// Returns the first choice's text, or the typed provider error.
    pub async fn complete(&self, history: &ConversationHistory) -> Result<String, LlmError> {
        let request = self.build_request(history);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.messages = request.messages.len(),
        );

        let response = self.provider.complete(&request).instrument(span).await?;

        debug!(
            response_id = %response.id,
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Completion received"
        );

        Ok(response.content)
    }

    /// Request a completion, turning any failure into a displayable reply.
    ///
    /// All failure kinds collapse into one string starting with
    /// [`ERROR_REPLY_PREFIX`]; use [`complete`](Self::complete) to tell them apart.
    pub async fn reply(&self, history: &ConversationHistory) -> String {
        match self.complete(history).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, provider = self.provider.name(), "Completion failed");
                error_reply(&e)
            }
        }
    }

    fn build_request(&self, history: &ConversationHistory) -> CompletionRequest {
        CompletionRequest {
            model: self.params.model.clone(),
            messages: history.messages().to_vec(),
            max_tokens: self.params.max_tokens,
            temperature: Some(self.params.temperature),
        }
    }
}
