//! LLM provider abstractions for chatmate.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations

pub mod provider;
