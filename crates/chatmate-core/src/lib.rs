//! Conversation logic and provider abstraction for chatmate.
//!
//! This crate defines the `LlmProvider` port that the infrastructure layer
//! implements, the bounded conversation history, the completion client, the
//! conversation loop, and the TO BE grammar practice mode. It depends on
//! `chatmate-types` and `regex` only -- never on `chatmate-infra` or any
//! network/terminal crate.

pub mod chat;
pub mod llm;
pub mod practice;
