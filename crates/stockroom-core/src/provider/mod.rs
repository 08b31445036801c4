//! Inventory provider: the single entry point for CRUD traffic.
//!
//! The provider resolves content URIs, validates field values, runs the
//! request against a [`StorageEngine`] and publishes a change notification
//! once a write has landed.
//!
//! Item URIs (`.../inventory/<id>`) are rewritten to an `_id = ?` selection
//! and any caller-supplied selection is ignored for them.

pub mod validation;

use crate::contract::{Identifier, UriResolver};
use crate::error::{Result, StockError};
use crate::item::Item;
use crate::notify::{ChangeKind, ChangeNotifier, Subscription};
use crate::storage::{Query, Selection, SqliteStorage, StorageEngine};
use crate::values::{ContentValues, Row};

use validation::{sanitize_insert, sanitize_update};

/// Rows returned by a query, plus a subscription to future changes under
/// the queried URI.
#[derive(Debug)]
pub struct Cursor {
    rows: Vec<Row>,
    subscription: Subscription,
}

impl Cursor {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// URI whose changes this cursor is subscribed to.
    pub fn notification_uri(&self) -> &str {
        self.subscription.uri()
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// Whether any change was published since the last call.
    pub fn has_changed(&self) -> bool {
        !self.subscription.drain().is_empty()
    }

    /// Convert every row into an [`Item`]. Requires a full projection.
    pub fn items(&self) -> Result<Vec<Item>> {
        self.rows.iter().map(Item::try_from).collect()
    }
}

/// Access layer over the inventory store.
pub struct InventoryProvider<S: StorageEngine = SqliteStorage> {
    storage: S,
    resolver: UriResolver,
    notifier: ChangeNotifier,
}

impl<S: StorageEngine> InventoryProvider<S> {
    pub fn new(storage: S, resolver: UriResolver) -> Self {
        Self {
            storage,
            resolver,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn resolver(&self) -> &UriResolver {
        &self.resolver
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn identify(&self, uri: &str) -> Result<Identifier> {
        self.resolver
            .resolve(uri)
            .ok_or_else(|| StockError::InvalidIdentifier(uri.to_string()))
    }

    /// Effective selection for a write or read through `identifier`.
    fn scope(identifier: Identifier, selection: Option<&Selection>) -> Option<Selection> {
        match identifier {
            Identifier::Collection => selection.cloned(),
            Identifier::Item(id) => Some(Selection::id_equals(id)),
        }
    }

    /// Type descriptor for a URI.
    pub fn get_type(&self, uri: &str) -> Result<String> {
        match self.identify(uri)? {
            Identifier::Collection => Ok(self.resolver.list_type()),
            Identifier::Item(_) => Ok(self.resolver.item_type()),
        }
    }

    /// Read rows.
    ///
    /// An empty result is not an error. The returned cursor is subscribed to
    /// changes under `uri`.
    pub fn query(&self, uri: &str, query: &Query) -> Result<Cursor> {
        let identifier = self.identify(uri)?;
        query.validate_columns()?;

        let mut effective = query.clone();
        effective.selection = Self::scope(identifier, query.selection.as_ref());

        // Subscribe before reading so no write between the two is missed.
        let subscription = self.notifier.subscribe(&self.resolver.uri_for(&identifier));
        let rows = self.storage.query(&effective)?;
        tracing::debug!(%uri, rows = rows.len(), "query");

        Ok(Cursor { rows, subscription })
    }

    /// Insert a new item through the collection URI.
    ///
    /// # Returns
    ///
    /// Returns the new item's URI, or `None` when the store refused the row.
    ///
    /// # Errors
    ///
    /// Returns `StockError::UnsupportedOperation` for item URIs and
    /// `StockError::InvalidArgument` naming the first invalid field.
    pub fn insert(&self, uri: &str, values: &ContentValues) -> Result<Option<String>> {
        match self.identify(uri)? {
            Identifier::Collection => {}
            Identifier::Item(_) => {
                return Err(StockError::UnsupportedOperation {
                    operation: "Insertion",
                    uri: uri.to_string(),
                })
            }
        }

        let sanitized = sanitize_insert(values)?;
        let Some(id) = self.storage.insert(&sanitized)? else {
            return Ok(None);
        };

        let item_uri = self.resolver.item_uri(id);
        tracing::debug!(%item_uri, "inserted item");
        self.notifier
            .notify(&self.resolver.collection_uri(), ChangeKind::Insert);
        Ok(Some(item_uri))
    }

    /// Apply a partial update.
    ///
    /// # Returns
    ///
    /// Returns the number of rows changed. An empty value set returns 0
    /// without touching storage.
    pub fn update(
        &self,
        uri: &str,
        values: &ContentValues,
        selection: Option<&Selection>,
    ) -> Result<usize> {
        let identifier = self.identify(uri)?;
        let sanitized = sanitize_update(values)?;
        if sanitized.is_empty() {
            return Ok(0);
        }

        let scope = Self::scope(identifier, selection);
        let updated = self.storage.update(&sanitized, scope.as_ref())?;
        tracing::debug!(%uri, updated, "update");
        if updated > 0 {
            self.notifier
                .notify(&self.resolver.uri_for(&identifier), ChangeKind::Update);
        }
        Ok(updated)
    }

    /// Delete matching rows.
    ///
    /// # Returns
    ///
    /// Returns the number of rows removed; 0 is not an error.
    pub fn delete(&self, uri: &str, selection: Option<&Selection>) -> Result<usize> {
        let identifier = self.identify(uri)?;

        let scope = Self::scope(identifier, selection);
        let deleted = self.storage.delete(scope.as_ref())?;
        tracing::debug!(%uri, deleted, "delete");
        if deleted > 0 {
            self.notifier
                .notify(&self.resolver.uri_for(&identifier), ChangeKind::Delete);
        }
        Ok(deleted)
    }

    /// Observe changes under `uri`.
    ///
    /// URIs this provider resolves are watched in their canonical form.
    pub fn subscribe(&self, uri: &str) -> Subscription {
        match self.resolver.resolve(uri) {
            Some(identifier) => self.notifier.subscribe(&self.resolver.uri_for(&identifier)),
            None => self.notifier.subscribe(uri),
        }
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.notifier.observer_count()
    }

    /// Stop observing. Dropping the subscription works as well.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.notifier.unsubscribe(subscription);
    }

    // --- Typed conveniences ---

    /// Fetch one item by id.
    pub fn get_item(&self, id: i64) -> Result<Option<Item>> {
        let cursor = self.query(&self.resolver.item_uri(id), &Query::new())?;
        cursor.rows().first().map(Item::try_from).transpose()
    }

    /// Fetch items from the collection.
    pub fn list_items(&self, query: &Query) -> Result<Vec<Item>> {
        self.query(&self.resolver.collection_uri(), query)?.items()
    }
}

impl InventoryProvider<SqliteStorage> {
    /// Provider over a SQLite engine with the default authority.
    pub fn with_sqlite(storage: SqliteStorage) -> Self {
        Self::new(storage, UriResolver::default())
    }
}
