//! Inventory contract: table layout and resource identifiers.
//!
//! Every consumer of the store addresses data through a content URI of the
//! form `content://<authority>/inventory[/<id>]`. The [`UriResolver`] turns
//! such a URI into an [`Identifier`]; nothing else in the crate parses URIs.

use std::fmt;

/// Name of the whole store, used as the URI authority.
pub const CONTENT_AUTHORITY: &str = "com.example.stockroom";

/// URI scheme for all resource identifiers.
pub const SCHEME: &str = "content";

/// Path segment naming the item collection.
pub const PATH_INVENTORY: &str = "inventory";

/// Base for the list-type descriptor.
pub const LIST_TYPE_BASE: &str = "vnd.stockroom.cursor.dir";

/// Base for the item-type descriptor.
pub const ITEM_TYPE_BASE: &str = "vnd.stockroom.cursor.item";

/// Database table holding one row per item.
pub const TABLE_NAME: &str = "inventory";

pub const COLUMN_ID: &str = "_id";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_PRICE: &str = "price";
pub const COLUMN_QUANTITY: &str = "quantity";
pub const COLUMN_IMAGE: &str = "image";
pub const COLUMN_SUPPLIER_NAME: &str = "supplier_name";
pub const COLUMN_SUPPLIER_EMAIL: &str = "supplier_email";
pub const COLUMN_SUPPLIER_PHONE: &str = "supplier_phone";

/// All columns in table order.
pub const ALL_COLUMNS: [&str; 8] = [
    COLUMN_ID,
    COLUMN_NAME,
    COLUMN_PRICE,
    COLUMN_QUANTITY,
    COLUMN_IMAGE,
    COLUMN_SUPPLIER_NAME,
    COLUMN_SUPPLIER_EMAIL,
    COLUMN_SUPPLIER_PHONE,
];

/// Writable columns, in validation order.
pub const WRITABLE_COLUMNS: [&str; 7] = [
    COLUMN_NAME,
    COLUMN_PRICE,
    COLUMN_QUANTITY,
    COLUMN_IMAGE,
    COLUMN_SUPPLIER_NAME,
    COLUMN_SUPPLIER_EMAIL,
    COLUMN_SUPPLIER_PHONE,
];

/// Returns true if `column` names a column of the inventory table.
pub fn is_known_column(column: &str) -> bool {
    ALL_COLUMNS.contains(&column)
}

/// A resolved resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// The whole item collection.
    Collection,
    /// A single item by row id.
    Item(i64),
}

impl Identifier {
    /// Row id carried by an item identifier.
    pub fn id(&self) -> Option<i64> {
        match self {
            Identifier::Collection => None,
            Identifier::Item(id) => Some(*id),
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Identifier::Item(_))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Collection => write!(f, "{}", PATH_INVENTORY),
            Identifier::Item(id) => write!(f, "{}/{}", PATH_INVENTORY, id),
        }
    }
}

/// Maps content URIs to identifiers for one authority.
///
/// Built once at startup and owned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriResolver {
    authority: String,
}

impl Default for UriResolver {
    fn default() -> Self {
        Self::new(CONTENT_AUTHORITY)
    }
}

impl UriResolver {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Resolve a URI to an identifier.
    ///
    /// Returns `None` when the URI does not match either resource shape.
    /// Query strings, fragments and a single trailing `/` are ignored.
    pub fn resolve(&self, uri: &str) -> Option<Identifier> {
        let uri = uri.split(['?', '#']).next().unwrap_or_default();
        let rest = uri.strip_prefix(SCHEME)?.strip_prefix("://")?;
        let path = rest.strip_prefix(self.authority.as_str())?.strip_prefix('/')?;
        let path = path.strip_suffix('/').unwrap_or(path);

        let mut segments = path.split('/');
        if segments.next()? != PATH_INVENTORY {
            return None;
        }
        match (segments.next(), segments.next()) {
            (None, _) => Some(Identifier::Collection),
            (Some(raw_id), None) => parse_row_id(raw_id).map(Identifier::Item),
            _ => None,
        }
    }

    /// URI addressing the whole collection.
    pub fn collection_uri(&self) -> String {
        format!("{}://{}/{}", SCHEME, self.authority, PATH_INVENTORY)
    }

    /// URI addressing a single item.
    pub fn item_uri(&self, id: i64) -> String {
        format!("{}/{}", self.collection_uri(), id)
    }

    pub fn uri_for(&self, identifier: &Identifier) -> String {
        match identifier {
            Identifier::Collection => self.collection_uri(),
            Identifier::Item(id) => self.item_uri(*id),
        }
    }

    /// Type descriptor for collection URIs.
    pub fn list_type(&self) -> String {
        format!("{}/{}/{}", LIST_TYPE_BASE, self.authority, PATH_INVENTORY)
    }

    /// Type descriptor for item URIs.
    pub fn item_type(&self) -> String {
        format!("{}/{}/{}", ITEM_TYPE_BASE, self.authority, PATH_INVENTORY)
    }
}

fn parse_row_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
