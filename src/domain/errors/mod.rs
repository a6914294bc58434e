// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Clip specification violates its invariants
    InvalidClip(String),
    /// Invalid time range
    InvalidTimeRange(String),
    /// No clip with the given id in the catalog
    ClipNotFound(u64),
    /// Review score outside 1..=5
    InvalidScore(i64),
    /// Configuration could not be loaded or validated
    ConfigError(String),
    /// The external player API never became available
    ApiUnavailable(String),
    /// The player factory refused to build a handle
    PlayerConstruction(String),
    /// No async runtime to schedule background work on
    RuntimeUnavailable(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::InvalidClip(msg) => write!(f, "Invalid clip: {}", msg),
            DomainError::InvalidTimeRange(msg) => write!(f, "Invalid time range: {}", msg),
            DomainError::ClipNotFound(id) => write!(f, "clip not found: {}", id),
            DomainError::InvalidScore(score) => {
                write!(f, "score must be between 1 and 5 (got {})", score)
            }
            DomainError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::ApiUnavailable(msg) => write!(f, "Player API unavailable: {}", msg),
            DomainError::PlayerConstruction(msg) => {
                write!(f, "Player construction failed: {}", msg)
            }
            DomainError::RuntimeUnavailable(msg) => write!(f, "Runtime unavailable: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
