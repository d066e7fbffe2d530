//! Error types for reflex-core

use thiserror::Error;

/// Main error type for the reflex-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Storage backend error
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic store-boundary failure; the underlying cause has been logged
    #[error("{0}")]
    Store(String),

    /// Log validation failed; carries every user-facing message
    #[error("invalid urge log: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Urge log not found
    #[error("urge log not found: {0}")]
    LogNotFound(String),

    /// Replacement action not found
    #[error("replacement action not found: {0}")]
    ActionNotFound(String),

    /// Invalid argument to a store operation
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for reflex-core
pub type Result<T> = std::result::Result<T, Error>;
