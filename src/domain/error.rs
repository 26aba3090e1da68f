//! Domain error types

use thiserror::Error;

/// Error when an audio file name is not a plain file name
#[derive(Debug, Clone, Error)]
#[error("Invalid audio file name: \"{input}\". Expected a bare file name such as hydration.mp3")]
pub struct InvalidFileNameError {
    pub input: String,
}

/// Error when an unknown catalog name is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid catalog: \"{input}\". Valid catalogs are: sample, pages")]
pub struct InvalidCatalogError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
