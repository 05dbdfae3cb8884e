//! Domain error types

use thiserror::Error;

/// Error when an alias definition line lacks the `trigger,replacement` separator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed alias entry on line {line_number}: \"{line}\". Expected format: <trigger>,<replacement>")]
pub struct MalformedAliasEntry {
    pub line_number: usize,
    pub line: String,
}

/// Error when a confidence threshold falls outside [0, 1]
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid confidence threshold: {value}. Expected a number between 0 and 1")]
pub struct InvalidThreshold {
    pub value: f32,
}

/// Error when parsing a server identifier
#[derive(Debug, Clone, Error)]
#[error("Invalid server id: \"{input}\". Expected an integer")]
pub struct ServerIdParseError {
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
