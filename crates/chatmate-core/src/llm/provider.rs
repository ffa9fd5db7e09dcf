//! LlmProvider trait definition.
//!
//! This is the core abstraction that all completion backends implement.
//! Uses RPITIT for `complete`.

use chatmate_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (OpenAI, test doubles, etc.).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Implementations live in chatmate-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
