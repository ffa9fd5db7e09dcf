//! Chat configuration loader for chatmate.
//!
//! Reads `config.toml` from the data directory (`~/.chatmate/` in production)
//! and deserializes it into [`ChatConfig`]. Falls back to defaults when the
//! file is missing or malformed; values that parse but are out of range are
//! rejected.

use std::path::{Path, PathBuf};

use chatmate_types::config::ChatConfig;
use chatmate_types::error::ConfigError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CHATMATE_DATA_DIR";

/// Resolve the chatmate data directory.
///
/// `$CHATMATE_DATA_DIR` if set, otherwise `~/.chatmate`, otherwise
/// `./.chatmate`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatmate");
    }

    // Last resort: current directory
    PathBuf::from(".chatmate")
}

/// Load chat configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ChatConfig::default()`].
/// - If the file cannot be read or parsed, logs a warning and returns the default.
/// - If the file parses, its values are validated and returned.
pub async fn load_chat_config(data_dir: &Path) -> Result<ChatConfig, ConfigError> {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return Ok(ChatConfig::default());
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return Ok(ChatConfig::default());
        }
    };

    let config = match toml::from_str::<ChatConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return Ok(ChatConfig::default());
        }
    };

    config.validate()?;
    tracing::debug!(
        path = %config_path.display(),
        model = %config.model,
        history_window = config.history_window,
        "Loaded config.toml"
    );
    Ok(config)
}
