//! Error types for the cardprint library.
//!
//! All fallible operations return [`Result`], whose error type is
//! [`CardprintError`]. Text processing itself never fails: empty or missing
//! text degrades to empty output. Errors are reserved for caller mistakes such
//! as asking for a card the corpus does not contain, or handing in an invalid
//! field configuration.
//!
//! # Examples
//!
//! ```
//! use cardprint::error::{CardprintError, Result};
//!
//! fn lookup(id: &str) -> Result<()> {
//!     Err(CardprintError::not_found(format!("card '{id}'")))
//! }
//!
//! assert!(lookup("c-1").unwrap_err().is_not_found());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for cardprint operations.
#[derive(Error, Debug)]
pub enum CardprintError {
    /// I/O errors (reading a corpus file, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid field or fingerprint configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A card id that is not part of the corpus
    #[error("Not found: {0}")]
    NotFound(String),

    /// Query-related errors
    #[error("Query error: {0}")]
    Query(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with CardprintError.
pub type Result<T> = std::result::Result<T, CardprintError>;

impl CardprintError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CardprintError::Config(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CardprintError::NotFound(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        CardprintError::Query(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CardprintError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CardprintError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error signals an unknown card.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CardprintError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = CardprintError::config("duplicate title field");
        assert_eq!(
            error.to_string(),
            "Configuration error: duplicate title field"
        );

        let error = CardprintError::not_found("card 'abc'");
        assert_eq!(error.to_string(), "Not found: card 'abc'");
        assert!(error.is_not_found());

        let error = CardprintError::invalid_argument("empty id list");
        assert_eq!(error.to_string(), "Error: Invalid argument: empty id list");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = CardprintError::from(io_error);

        match error {
            CardprintError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
