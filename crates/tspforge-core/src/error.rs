//! Error types for TspForge

use thiserror::Error;

/// Main error type for TspForge operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TspForgeError {
    /// Malformed distance matrix, tour or solve parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Algorithm requested above its configured city ceiling
    #[error("{algorithm} supports at most {limit} cities, got {num_cities}")]
    SizeLimitExceeded {
        algorithm: &'static str,
        num_cities: usize,
        limit: usize,
    },

    /// Solve was cancelled by the caller before completion
    #[error("Solve was cancelled")]
    Cancelled,

    /// Algorithm selector did not name a known algorithm
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TspForgeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TspForgeError::InvalidInput(msg.into())
    }
}

/// Result type alias for TspForge operations
pub type Result<T> = std::result::Result<T, TspForgeError>;
