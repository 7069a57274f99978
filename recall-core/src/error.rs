//! Error types for the recall core library.

use thiserror::Error;

/// Top-level error type for all recall operations.
#[derive(Error, Debug)]
pub enum RecallError {
    /// Sequence length bounds are misconfigured.
    #[error("Invalid range: minimum {minimum} must be >= 1 and maximum {maximum} must be >= minimum")]
    InvalidRange {
        /// Requested minimum number of digits.
        minimum: usize,
        /// Requested maximum number of digits.
        maximum: usize,
    },

    /// Word spacing is misconfigured.
    #[error("Invalid word interval: {word_interval} (must be >= 1)")]
    InvalidInterval {
        /// Requested spacing between words.
        word_interval: usize,
    },

    /// A difficulty choice did not name any known preset.
    #[error("Unknown difficulty: {0:?}")]
    InvalidDifficulty(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, RecallError>;
