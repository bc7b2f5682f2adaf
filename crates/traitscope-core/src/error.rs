//! Core error types for traitscope-core.
//!
//! This module defines the error hierarchy using thiserror. Network and
//! authentication failures never show up here: they belong to whichever
//! collaborator talks to the backend.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for traitscope-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Trait list, history or submission source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for questionnaires, catalogs and test records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A questionnaire cannot be built without any traits.
    #[error("Trait list is empty; the questionnaire cannot be rendered")]
    EmptyTraitList,

    /// Trait id not present in the catalog or questionnaire
    #[error("Unknown trait: {0}")]
    UnknownTrait(String),

    /// Trait id listed more than once
    #[error("Duplicate trait: {0}")]
    DuplicateTrait(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the file-backed collaborators.
#[derive(Error, Debug)]
pub enum SourceError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not the expected JSON shape
    #[error("Failed to parse {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Payload could not be written
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record in the payload is malformed or fails validation
    #[error("Invalid record at index {index} in {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
