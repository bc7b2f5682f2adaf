//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Timestamp display offset and date style
//! - Size of the "recent activity" list
//! - An optional custom trait catalog
//!
//! Configuration is stored at `~/.config/traitscope/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::history::{DateStyle, DisplayTimezone, HistoryAggregator, DEFAULT_RECENT_COUNT};
use crate::questionnaire::TraitCatalog;

/// Timestamp display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Minutes east of UTC used when showing timestamps.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub date_style: DateStyle,
}

/// History view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
}

/// Questionnaire configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireConfig {
    /// JSON catalog used instead of the built-in traits.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/traitscope/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub questionnaire: QuestionnaireConfig,
}

fn default_recent_count() -> usize {
    DEFAULT_RECENT_COUNT
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            date_style: DateStyle::Short,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_count: default_recent_count(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // An empty value clears optional keys.
                    _ if value.is_empty() => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of `config.toml` in the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there when it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Self::default()
        })
    }

    /// Check values that TOML alone cannot constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        DisplayTimezone::from_offset_minutes(self.display.utc_offset_minutes).map_err(|e| {
            ConfigError::InvalidValue {
                key: "display.utc_offset_minutes".to_string(),
                message: e.to_string(),
            }
        })?;
        if self.history.recent_count == 0 {
            return Err(ConfigError::InvalidValue {
                key: "history.recent_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. Returns error if key is
    /// unknown or the result does not validate.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Display timezone built from `display.utc_offset_minutes`.
    pub fn timezone(&self) -> DisplayTimezone {
        DisplayTimezone::from_offset_minutes(self.display.utc_offset_minutes).unwrap_or_default()
    }

    pub fn aggregator(&self) -> HistoryAggregator {
        HistoryAggregator::with_recent_count(self.history.recent_count)
    }

    /// The configured catalog, or the built-in one when none is set.
    /// Relative catalog paths are looked up in the data directory.
    pub fn catalog(&self) -> crate::error::Result<TraitCatalog> {
        match &self.questionnaire.catalog_path {
            Some(_) => self.catalog_in(&data_dir()?),
            None => Ok(TraitCatalog::builtin()),
        }
    }

    /// Like [`catalog`](Self::catalog) with `base` standing in for the data
    /// directory.
    pub fn catalog_in(&self, base: &Path) -> crate::error::Result<TraitCatalog> {
        match &self.questionnaire.catalog_path {
            Some(path) => TraitCatalog::from_json_file(&base.join(path)),
            None => Ok(TraitCatalog::builtin()),
        }
    }
}
