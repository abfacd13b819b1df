//! Error types for the Kiroku library.
//!
//! All errors are represented by the [`KirokuError`] enum. Most internal
//! failures in the search path never surface as errors at all: they degrade
//! to empty vectors or empty result lists, so the variants here cover the
//! collaborator seams (store adapters, configuration) rather than the
//! per-query flow.

use std::io;

use thiserror::Error;

/// The main error type for Kiroku operations.
#[derive(Error, Debug)]
pub enum KirokuError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Entry store errors (fetch or vector write failures)
    #[error("Store error: {0}")]
    Store(String),

    /// Embedding model errors (configuration, pool construction)
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KirokuError.
pub type Result<T> = std::result::Result<T, KirokuError>;

impl KirokuError {
    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        KirokuError::Store(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        KirokuError::Embedding(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KirokuError::InvalidOperation(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        KirokuError::InvalidOperation(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        KirokuError::Other(format!("Not found: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KirokuError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KirokuError::store("connection reset");
        assert_eq!(error.to_string(), "Store error: connection reset");

        let error = KirokuError::embedding("pool exhausted");
        assert_eq!(error.to_string(), "Embedding error: pool exhausted");

        let error = KirokuError::invalid_argument("limit out of range");
        assert_eq!(
            error.to_string(),
            "Invalid operation: Invalid argument: limit out of range"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let kiroku_error = KirokuError::from(io_error);

        match kiroku_error {
            KirokuError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
