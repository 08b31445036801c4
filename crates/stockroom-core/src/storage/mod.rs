//! Storage abstraction for Stockroom.
//!
//! This module defines the `StorageEngine` trait and the request types the
//! provider hands to it.
//!
//! ## Architecture
//!
//! The storage layer is backend-agnostic:
//! - SQLite file database (`SqliteStorage`)
//! - In-memory SQLite for tests
//!
//! Storage engines are responsible for:
//! - Creating the inventory table on first open
//! - Applying additive schema migrations on upgrade
//! - Executing each request as a single atomic statement

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::{DatabaseLocation, SqliteStorage, DATABASE_NAME, DATABASE_VERSION};
pub use traits::StorageEngine;
pub use types::{Direction, Query, Selection};
