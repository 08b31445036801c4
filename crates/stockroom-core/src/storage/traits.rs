//! Storage engine trait definition.
//!
//! The `StorageEngine` trait is the seam between the provider and the
//! database. The provider validates requests and resolves URIs; an engine
//! only runs single statements against the inventory table.

use super::types::{Query, Selection};
use crate::error::Result;
use crate::values::{ContentValues, Row};

/// Storage engine interface for the inventory table.
///
/// All implementations must ensure:
/// - Each call executes as one atomic statement
/// - Readers never observe a partially applied write
/// - Row ids are assigned by the engine and never reused
pub trait StorageEngine: Send + Sync {
    /// Run a read and return matching rows in result order.
    ///
    /// Column names in `query` have already been checked by the caller.
    fn query(&self, query: &Query) -> Result<Vec<Row>>;

    /// Insert one row.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(id))` with the assigned row id, or `Ok(None)` when
    /// the database refused the row (constraint violation and the like).
    ///
    /// # Errors
    ///
    /// Returns `StockError::Storage` if the database cannot be reached.
    fn insert(&self, values: &ContentValues) -> Result<Option<i64>>;

    /// Apply `values` to every row matching `selection` (all rows when `None`).
    ///
    /// # Returns
    ///
    /// Returns the number of rows changed.
    fn update(&self, values: &ContentValues, selection: Option<&Selection>) -> Result<usize>;

    /// Delete every row matching `selection` (all rows when `None`).
    ///
    /// # Returns
    ///
    /// Returns the number of rows removed.
    fn delete(&self, selection: Option<&Selection>) -> Result<usize>;

    // --- Maintenance operations ---

    /// Current schema version of the backing store.
    fn schema_version(&self) -> Result<i32>;

    /// Check store integrity.
    ///
    /// Returns `Ok(())` if the store is valid, or an error describing the problem.
    fn check_integrity(&self) -> Result<()>;
}
