//! Error types for the Godmode core library.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading directories and locale tables.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No translation table exists for the requested locale.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// A locale table parsed, but its root is not a JSON object.
    #[error("locale table for '{0}' must be a JSON object")]
    MalformedLocale(String),
}
