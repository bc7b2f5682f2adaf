mod config;

pub use config::{Config, DisplayConfig, HistoryConfig, QuestionnaireConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the Traitscope data directory, creating it if needed.
///
/// `TRAITSCOPE_HOME` wins when set. Otherwise `~/.config/traitscope[-dev]/`
/// based on `TRAITSCOPE_ENV` (set it to `dev` for the development
/// directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TRAITSCOPE_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TRAITSCOPE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("traitscope-dev")
            } else {
                base_dir.join("traitscope")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
