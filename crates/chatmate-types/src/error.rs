use thiserror::Error;

/// Errors raised while assembling the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} environment variable not found")]
    MissingCredential { var: String },

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// The user's input stream failed before it was closed.
///
/// Distinct from end of input: the session stops without a farewell and the
/// process exits non-zero.
#[derive(Debug, Error)]
#[error("failed to read input: {0}")]
pub struct InputError(pub String);
