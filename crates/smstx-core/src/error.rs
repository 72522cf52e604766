//! Error types for the smstx-core library.

use thiserror::Error;

/// Main error type for the smstx library.
#[derive(Error, Debug)]
pub enum SmstxError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recoverable failures of a single parse.
///
/// These are sentinel outcomes, not faults: the caller decides whether to
/// ask for manual input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Input was empty or whitespace only.
    #[error("message is empty")]
    EmptyInput,

    /// No amount rule matched, or the captured amount was zero.
    #[error("no amount found in message")]
    NoAmountFound,
}

/// Result type for the smstx library.
pub type Result<T> = std::result::Result<T, SmstxError>;
