//! Inventory table definition and schema versioning.

use rusqlite::Connection;

use crate::contract::{
    COLUMN_ID, COLUMN_IMAGE, COLUMN_NAME, COLUMN_PRICE, COLUMN_QUANTITY, COLUMN_SUPPLIER_EMAIL,
    COLUMN_SUPPLIER_NAME, COLUMN_SUPPLIER_PHONE, TABLE_NAME,
};
use crate::error::{Result, StockError};

/// Schema version written to `PRAGMA user_version`.
pub const DATABASE_VERSION: i32 = 1;

/// Additive migration steps, keyed by the version they produce.
///
/// Steps may only add columns, tables or indexes. Existing data is never
/// dropped or rebuilt.
pub const MIGRATIONS: &[(i32, &str)] = &[];

pub fn create_table_sql() -> String {
    format!(
        "CREATE TABLE {table} (
            {id} INTEGER PRIMARY KEY AUTOINCREMENT,
            {name} TEXT NOT NULL,
            {price} TEXT NOT NULL,
            {quantity} INTEGER NOT NULL DEFAULT 0,
            {image} BLOB,
            {supplier_name} TEXT NOT NULL,
            {supplier_email} TEXT NOT NULL,
            {supplier_phone} TEXT NOT NULL
        );",
        table = TABLE_NAME,
        id = COLUMN_ID,
        name = COLUMN_NAME,
        price = COLUMN_PRICE,
        quantity = COLUMN_QUANTITY,
        image = COLUMN_IMAGE,
        supplier_name = COLUMN_SUPPLIER_NAME,
        supplier_email = COLUMN_SUPPLIER_EMAIL,
        supplier_phone = COLUMN_SUPPLIER_PHONE,
    )
}

pub fn user_version(conn: &Connection) -> Result<i32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Bring the database to [`DATABASE_VERSION`].
///
/// A fresh database gets the table; an older one gets the pending
/// migration steps. Everything runs in one transaction.
pub fn prepare(conn: &mut Connection) -> Result<()> {
    let version = user_version(conn)?;
    if version == DATABASE_VERSION {
        return Ok(());
    }
    if version > DATABASE_VERSION {
        return Err(StockError::Storage(format!(
            "Cannot downgrade database from version {} to {}",
            version, DATABASE_VERSION
        )));
    }

    let tx = conn.transaction()?;
    if version == 0 {
        tx.execute_batch(&create_table_sql())?;
        tracing::info!(version = DATABASE_VERSION, "created inventory table");
    } else {
        upgrade(&tx, version, DATABASE_VERSION)?;
    }
    tx.pragma_update(None, "user_version", DATABASE_VERSION)?;
    tx.commit()?;
    Ok(())
}

fn upgrade(conn: &Connection, old_version: i32, new_version: i32) -> Result<()> {
    for (target, sql) in MIGRATIONS
        .iter()
        .filter(|(target, _)| *target > old_version && *target <= new_version)
    {
        tracing::info!(from = old_version, to = *target, "applying schema migration");
        conn.execute_batch(sql)?;
    }
    Ok(())
}
