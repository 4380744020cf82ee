//! Error types for nokor-vector.

use thiserror::Error;

/// Result type for nokor-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in nokor-vector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Dimension mismatch between vector and index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (e.g., contains NaN or Inf).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    /// Persistence error (serialization, or a mismatched artifact triple).
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
