//! SQLite storage backend.
//!
//! `SqliteStorage` owns the single connection to the inventory database.
//! The connection is opened on first use and kept for the lifetime of the
//! engine; every statement runs under one mutex, which serialises writes
//! against reads.

mod schema;

pub use schema::{DATABASE_VERSION, MIGRATIONS};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::OnceCell;
use rusqlite::{params_from_iter, Connection};

use crate::contract::{ALL_COLUMNS, TABLE_NAME};
use crate::error::{Result, StockError};
use crate::storage::traits::StorageEngine;
use crate::storage::types::{Query, Selection};
use crate::values::{ContentValues, FieldValue, Row};

/// Default database file name.
pub const DATABASE_NAME: &str = "store.db";

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    InMemory,
}

/// SQLite storage engine for the inventory table.
pub struct SqliteStorage {
    location: DatabaseLocation,
    conn: OnceCell<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Create an engine for `location` without touching the database yet.
    pub fn new(location: DatabaseLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
        }
    }

    /// Engine for a database file.
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self::new(DatabaseLocation::File(path.as_ref().to_path_buf()))
    }

    /// Engine for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(DatabaseLocation::InMemory)
    }

    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }

    /// Open (or create) the database.
    ///
    /// Idempotent: only the first successful call touches the disk.
    pub fn open(&self) -> Result<()> {
        self.conn.get_or_try_init(|| self.connect()).map(|_| ())
    }

    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    fn connect(&self) -> Result<Mutex<Connection>> {
        let mut conn = match &self.location {
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                tracing::debug!(path = %path.display(), "opening database");
                Connection::open(path)?
            }
            DatabaseLocation::InMemory => Connection::open_in_memory()?,
        };
        schema::prepare(&mut conn)?;
        Ok(Mutex::new(conn))
    }

    /// Lock the database connection, opening it first if needed.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .get_or_try_init(|| self.connect())?
            .lock()
            .map_err(|_| StockError::Storage("SQLite connection poisoned".to_string()))
    }
}

fn where_clause(selection: Option<&Selection>) -> String {
    match selection {
        Some(selection) if !selection.clause.trim().is_empty() => {
            format!(" WHERE {}", selection.clause)
        }
        _ => String::new(),
    }
}

fn selection_args(selection: Option<&Selection>) -> &[FieldValue] {
    selection.map(|s| s.args.as_slice()).unwrap_or_default()
}

impl StorageEngine for SqliteStorage {
    fn query(&self, query: &Query) -> Result<Vec<Row>> {
        let conn = self.lock_conn()?;

        let columns: Vec<&str> = match query.projection {
            Some(ref projection) if !projection.is_empty() => {
                projection.iter().map(String::as_str).collect()
            }
            _ => ALL_COLUMNS.to_vec(),
        };

        let mut sql = format!(
            "SELECT {} FROM {}{}",
            columns.join(", "),
            TABLE_NAME,
            where_clause(query.selection.as_ref())
        );
        if !query.order_by.is_empty() {
            let terms: Vec<String> = query
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction.as_sql()))
                .collect();
            sql.push_str(&format!(" ORDER BY {}", terms.join(", ")));
        }
        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        tracing::debug!(%sql, "query");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params_from_iter(selection_args(query.selection.as_ref())),
                |row| {
                    let mut values = Vec::with_capacity(columns.len());
                    for (index, column) in columns.iter().enumerate() {
                        values.push((column.to_string(), row.get::<_, FieldValue>(index)?));
                    }
                    Ok(Row::new(values))
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn insert(&self, values: &ContentValues) -> Result<Option<i64>> {
        let conn = self.lock_conn()?;

        let sql = if values.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", TABLE_NAME)
        } else {
            let columns: Vec<&str> = values.keys().collect();
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                TABLE_NAME,
                columns.join(", "),
                placeholders
            )
        };
        tracing::debug!(%sql, "insert");

        match conn.execute(&sql, params_from_iter(values.iter().map(|(_, value)| value))) {
            Ok(_) => Ok(Some(conn.last_insert_rowid())),
            Err(err @ rusqlite::Error::SqliteFailure(..)) => {
                tracing::error!(error = %err, "Failed to insert row");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, values: &ContentValues, selection: Option<&Selection>) -> Result<usize> {
        if values.is_empty() {
            return Ok(0);
        }
        let conn = self.lock_conn()?;

        let assignments: Vec<String> = values.keys().map(|column| format!("{} = ?", column)).collect();
        let sql = format!(
            "UPDATE {} SET {}{}",
            TABLE_NAME,
            assignments.join(", "),
            where_clause(selection)
        );
        tracing::debug!(%sql, "update");

        let params = values
            .iter()
            .map(|(_, value)| value)
            .chain(selection_args(selection));
        Ok(conn.execute(&sql, params_from_iter(params))?)
    }

    fn delete(&self, selection: Option<&Selection>) -> Result<usize> {
        let conn = self.lock_conn()?;

        let sql = format!("DELETE FROM {}{}", TABLE_NAME, where_clause(selection));
        tracing::debug!(%sql, "delete");

        Ok(conn.execute(&sql, params_from_iter(selection_args(selection)))?)
    }

    fn schema_version(&self) -> Result<i32> {
        let conn = self.lock_conn()?;
        schema::user_version(&conn)
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare("PRAGMA integrity_check")?;
        let problems: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .filter(|line| line != "ok")
            .collect();
        if !problems.is_empty() {
            return Err(StockError::Storage(format!(
                "Integrity check failed: {}",
                problems.join("; ")
            )));
        }

        let negative: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE quantity < 0", TABLE_NAME),
            [],
            |row| row.get(0),
        )?;
        if negative > 0 {
            return Err(StockError::Storage(format!(
                "Integrity check failed: {} item(s) with negative quantity",
                negative
            )));
        }

        let version = schema::user_version(&conn)?;
        if version != DATABASE_VERSION {
            return Err(StockError::Storage(format!(
                "Integrity check failed: schema version {} (expected {})",
                version, DATABASE_VERSION
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn widget_values() -> ContentValues {
        ContentValues::new()
            .with("name", "Widget")
            .with("price", "9.99")
            .with("quantity", 5)
            .with("supplier_name", "Acme")
            .with("supplier_email", "a@acme.com")
            .with("supplier_phone", "555-0100")
    }

    #[test]
    fn test_open_is_lazy_and_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(DATABASE_NAME);
        let storage = SqliteStorage::at_path(&path);

        assert!(!storage.is_open());
        assert!(!path.exists());

        storage.open().unwrap();
        storage.open().unwrap();
        assert!(storage.is_open());
        assert!(path.exists());
        assert_eq!(storage.schema_version().unwrap(), DATABASE_VERSION);
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DATABASE_NAME);

        let first = SqliteStorage::at_path(&path);
        let id = first.insert(&widget_values()).unwrap().unwrap();
        drop(first);

        let second = SqliteStorage::at_path(&path);
        let rows = second
            .query(&Query::new().selection(Selection::id_equals(id)))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&FieldValue::Text("Widget".into())));
    }

    #[test]
    fn test_insert_refused_by_constraint_returns_none() {
        let storage = SqliteStorage::in_memory();
        let mut values = widget_values();
        values.remove("supplier_phone");
        assert_eq!(storage.insert(&values).unwrap(), None);
        assert!(storage.query(&Query::new()).unwrap().is_empty());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let storage = SqliteStorage::in_memory();
        let first = storage.insert(&widget_values()).unwrap().unwrap();
        assert_eq!(storage.delete(Some(&Selection::id_equals(first))).unwrap(), 1);
        let second = storage.insert(&widget_values()).unwrap().unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_update_and_delete_counts() {
        let storage = SqliteStorage::in_memory();
        for _ in 0..3 {
            storage.insert(&widget_values()).unwrap();
        }
        let changes = ContentValues::new().with("quantity", 9);
        assert_eq!(storage.update(&changes, None).unwrap(), 3);

        let none = Selection::new("name = ?", vec!["Nothing".into()]);
        assert_eq!(storage.update(&changes, Some(&none)).unwrap(), 0);
        assert_eq!(storage.delete(Some(&none)).unwrap(), 0);
        assert_eq!(storage.delete(None).unwrap(), 3);
    }

    #[test]
    fn test_query_projection_order_and_limit() {
        let storage = SqliteStorage::in_memory();
        for name in ["b", "c", "a"] {
            storage.insert(&widget_values().with("name", name)).unwrap();
        }
        let rows = storage
            .query(
                &Query::new()
                    .projection(["name"])
                    .order_by("name", crate::storage::Direction::Descending)
                    .limit(2),
            )
            .unwrap();
        let names: Vec<_> = rows
            .iter()
            .map(|row| row.get("name").and_then(FieldValue::as_str).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["c", "b"]);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn test_check_integrity_on_fresh_store() {
        let storage = SqliteStorage::in_memory();
        storage.check_integrity().unwrap();
    }
}
