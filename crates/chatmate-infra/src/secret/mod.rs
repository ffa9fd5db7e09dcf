//! Credential resolution.
//!
//! The only credential chatmate needs is the OpenAI API key, read from the
//! process environment after an optional `.env` file has been merged in.

pub mod env;

pub use env::{EnvSecretProvider, OPENAI_API_KEY, load_dotenv};

use secrecy::SecretString;

use chatmate_types::error::ConfigError;

/// Read-only lookup of named secrets.
pub trait SecretProvider {
    /// Look up `key`. Returns `None` if this provider has no usable value.
    fn get(&self, key: &str) -> Option<SecretString>;

    /// Look up a required credential.
    fn require(&self, key: &str) -> Result<SecretString, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingCredential {
            var: key.to_string(),
        })
    }
}
