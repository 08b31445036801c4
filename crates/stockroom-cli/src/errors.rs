//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use stockroom_core::StockError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, database, item)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// The store refused the write
    StorageFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::StorageFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create a StorageFailed error.
    pub fn storage_failed(message: impl Into<String>) -> Self {
        CliError::StorageFailed(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::StorageFailed(_) => exit_codes::STORAGE_FAILED,
        }
    }
}

/// Exit code for a core error.
pub fn stock_exit_code(err: &StockError) -> i32 {
    match err {
        StockError::InvalidIdentifier(_)
        | StockError::UnsupportedOperation { .. }
        | StockError::InvalidArgument { .. } => exit_codes::INVALID_INPUT,
        StockError::Storage(_) => exit_codes::STORAGE_FAILED,
    }
}

/// Exit code for any error returned by a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(stock_err) = err.downcast_ref::<StockError>() {
        return stock_exit_code(stock_err);
    }
    exit_codes::FAILURE
}
