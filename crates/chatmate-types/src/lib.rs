//! Shared domain types for chatmate.
//!
//! This crate contains the data shapes passed between the layers: chat
//! messages, completion requests and responses, runtime configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod llm;
