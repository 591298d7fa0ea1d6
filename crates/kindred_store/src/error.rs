//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in a document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No entity exists for the requested key.
    #[error("entity not found: {key}")]
    NotFound {
        /// Rendered form of the key that was looked up.
        key: String,
    },

    /// The supplied key does not belong to the addressed kind.
    #[error("kind mismatch: key {key} does not belong to kind {kind}")]
    KindMismatch {
        /// The kind the operation addressed.
        kind: String,
        /// Rendered form of the offending key.
        key: String,
    },

    /// Backend-specific failure (connectivity, quota, size limits).
    #[error("backend error: {message}")]
    Backend {
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Creates a not-found error for a key.
    pub fn not_found(key: impl ToString) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }

    /// Creates a kind mismatch error.
    pub fn kind_mismatch(kind: impl Into<String>, key: impl ToString) -> Self {
        Self::KindMismatch {
            kind: kind.into(),
            key: key.to_string(),
        }
    }

    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
