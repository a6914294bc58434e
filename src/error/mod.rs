//! Error handling module for EchoSlice

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for EchoSlice operations
#[derive(Error, Debug)]
pub enum EchoSliceError {
    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS.ms, MM:SS.ms, or seconds")]
    InvalidTimeFormat { time: String },

    /// Clip selection on the command line is incomplete
    #[error("Missing clip selection: {message}")]
    MissingClip { message: String },

    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration parse error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for EchoSlice operations
pub type EchoSliceResult<T> = std::result::Result<T, EchoSliceError>;
