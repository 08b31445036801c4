//! # Stockroom Core
//!
//! Core library for Stockroom - a single-user inventory tracker backed by a
//! local SQLite database.
//!
//! This crate provides the data-access layer independent of any front end.
//!
//! ## Architecture
//!
//! - **contract**: Table layout, column names, content URIs
//! - **storage**: Storage engine trait and the SQLite implementation
//! - **provider**: URI routing, field validation, CRUD, change publishing
//! - **notify**: Observer registry and change events
//! - **item**: Typed item views and request builders
//!
//! ## Example
//!
//! ```
//! use stockroom_core::{InventoryProvider, NewItem, Query, SqliteStorage};
//!
//! let provider = InventoryProvider::with_sqlite(SqliteStorage::in_memory());
//! let collection = provider.resolver().collection_uri();
//!
//! let item = NewItem::new("Widget", "9.99", "Acme", "a@acme.com", "555-0100").with_quantity(5);
//! let uri = provider.insert(&collection, &item.to_values())?.expect("row stored");
//!
//! let cursor = provider.query(&uri, &Query::new())?;
//! assert_eq!(cursor.items()?[0].quantity, 5);
//! # Ok::<(), stockroom_core::StockError>(())
//! ```

pub mod contract;
pub mod error;
pub mod item;
pub mod notify;
pub mod provider;
pub mod storage;
pub mod values;

pub use contract::{Identifier, UriResolver};
pub use error::{Result, StockError};
pub use item::{Item, ItemChanges, NewItem};
pub use notify::{ChangeEvent, ChangeKind, Subscription};
pub use provider::{Cursor, InventoryProvider};
pub use storage::{
    DatabaseLocation, Direction, Query, Selection, SqliteStorage, StorageEngine,
};
pub use values::{ContentValues, FieldValue, Row};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
