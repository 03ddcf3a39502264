//! Error types for dom-mapper construction, encoding and markup parsing.
//!
//! Decoding has no error path: malformed or absent scalar data degrades to
//! [`Value::Null`](crate::Value::Null) instead.

use thiserror::Error;

/// Errors that can occur while configuring a mapper, encoding a value or
/// parsing markup.
#[derive(Error, Debug)]
pub enum Error {
    /// A mapper was constructed without a document collaborator.
    #[error("A document instance is required")]
    MissingDocument,

    /// The encoder was handed a value it has no node representation for.
    #[error("Unsupported value for encoding: {value}")]
    UnsupportedValue { value: String },

    /// The value nests deeper than the configured `max_depth`.
    #[error("Nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// The input string was not valid markup.
    /// Includes the 1-based line number where the error was detected.
    #[error("Markup parse error at line {line}: {message}")]
    MarkupParse { line: usize, message: String },

    /// The input string was not valid JSON (string API).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised by a user-supplied encode override.
    #[error("{0}")]
    Custom(String),
}

/// Convenience alias used throughout dom-mapper.
pub type Result<T> = std::result::Result<T, Error>;
