//! Environment variable secret provider.
//!
//! A read-only lookup over the process environment. `.env` in the working
//! directory is merged into the environment first by [`load_dotenv`];
//! variables that are already set take precedence over the file.

use secrecy::SecretString;

use super::SecretProvider;

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Merge `.env` from the current directory into the process environment.
///
/// A missing file is not an error. Any other failure is reported on stderr
/// and startup continues, since logging is not initialized yet at this point.
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("Warning: failed to load .env file: {err}");
    }
}

/// Environment variable secret provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    /// Create a new environment variable secret provider.
    pub fn new() -> Self {
        Self
    }
}

impl SecretProvider for EnvSecretProvider {
    /// Look up `key`, treating unset, empty, and non-Unicode values as absent.
    fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.is_empty() => Some(SecretString::from(val)),
            // Empty or invalid Unicode -- treat as not found
            Ok(_) | Err(std::env::VarError::NotUnicode(_)) => None,
            Err(std::env::VarError::NotPresent) => None,
        }
    }
}
