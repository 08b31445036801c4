//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, database, item).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, field values, or URIs.
    pub const INVALID_INPUT: i32 = 4;

    /// The database refused or failed the operation.
    pub const STORAGE_FAILED: i32 = 5;
}

