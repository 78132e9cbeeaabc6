//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that reject a control message as a whole.
///
/// Individual bad fields never produce an error; they are reported in
/// [`ParsedMessage::rejected`](crate::ParsedMessage::rejected) instead.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The text is not valid JSON
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object
    #[error("message must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The `type` tag names something other than a setup message
    #[error("unsupported message type: {0}")]
    UnsupportedType(String),
}

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A parameter key that names no voice parameter
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    /// Job settings outside their valid range
    #[error("invalid render job: {0}")]
    InvalidJob(String),

    /// A scheduled message was rejected as a whole
    #[error("message at sample {at_sample}: {source}")]
    Message {
        /// Sample index the message was scheduled for.
        at_sample: u64,
        /// Why the message was rejected.
        #[source]
        source: MessageError,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
