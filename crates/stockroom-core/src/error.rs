//! Error types for Stockroom core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-facing messages.

use thiserror::Error;

/// Result type alias for Stockroom operations.
pub type Result<T> = std::result::Result<T, StockError>;

/// Core error type for Stockroom operations.
#[derive(Debug, Error)]
pub enum StockError {
    /// The URI does not match any known resource shape
    #[error("Unknown URI: {0}")]
    InvalidIdentifier(String),

    /// The operation is not defined for this URI shape
    #[error("{operation} is not supported for {uri}")]
    UnsupportedOperation { operation: &'static str, uri: String },

    /// A field value failed validation
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StockError {
    pub(crate) fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StockError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field for `InvalidArgument` errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            StockError::InvalidArgument { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StockError {
    fn from(err: rusqlite::Error) -> Self {
        StockError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for StockError {
    fn from(err: std::io::Error) -> Self {
        StockError::Storage(err.to_string())
    }
}
