//! Infrastructure layer for chatmate.
//!
//! Contains the implementation of the `LlmProvider` port defined in
//! `chatmate-core` (an OpenAI-compatible provider built on `async-openai`),
//! credential lookup from the environment and `.env`, and the optional
//! `config.toml` loader.

pub mod config;
pub mod llm;
pub mod secret;
