//! Error types for MovieDB
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using MovieError
pub type Result<T> = std::result::Result<T, MovieError>;

/// Unified error type for MovieDB operations
#[derive(Debug, Error)]
pub enum MovieError {
    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    /// Backing file missing, unreadable, or not a JSON array of records
    #[error("failed to read collection from {}: {reason}", path.display())]
    StorageRead { path: PathBuf, reason: String },

    /// Backing file could not be replaced
    #[error("failed to write collection to {}: {reason}", path.display())]
    StorageWrite { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("movie not found: {0}")]
    NotFound(String),

    #[error("duplicate movie id: {0}")]
    DuplicateId(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    /// Malformed numeric query argument
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Caller-supplied payload that does not decode into a record or patch
    #[error("serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

impl MovieError {
    pub(crate) fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        MovieError::StorageRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        MovieError::StorageWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for a lookup that legitimately found nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, MovieError::NotFound(_))
    }

    /// True for infrastructure failures on the backing file
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            MovieError::StorageRead { .. } | MovieError::StorageWrite { .. }
        )
    }
}

impl From<serde_json::Error> for MovieError {
    fn from(err: serde_json::Error) -> Self {
        MovieError::Serialization(err.to_string())
    }
}
