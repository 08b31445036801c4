//! Typed views over inventory rows.
//!
//! The provider speaks [`ContentValues`] and [`Row`]; these types are the
//! convenience layer callers use to build requests and read results.

use serde::{Deserialize, Serialize};

use crate::contract::{
    COLUMN_ID, COLUMN_IMAGE, COLUMN_NAME, COLUMN_PRICE, COLUMN_QUANTITY, COLUMN_SUPPLIER_EMAIL,
    COLUMN_SUPPLIER_NAME, COLUMN_SUPPLIER_PHONE,
};
use crate::error::{Result, StockError};
use crate::values::{ContentValues, FieldValue, Row};

/// One stored inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// Decimal-formatted price, stored as text
    pub price: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
    pub supplier_name: String,
    pub supplier_email: String,
    pub supplier_phone: String,
}

fn required<'a>(row: &'a Row, column: &str) -> Result<&'a FieldValue> {
    row.get(column)
        .ok_or_else(|| StockError::invalid_argument(column, "column not present in row"))
}

fn text(row: &Row, column: &str) -> Result<String> {
    match required(row, column)? {
        FieldValue::Text(s) => Ok(s.clone()),
        FieldValue::Integer(n) => Ok(n.to_string()),
        FieldValue::Real(f) => Ok(f.to_string()),
        other => Err(StockError::Storage(format!(
            "Column {} holds {} instead of text",
            column,
            other.type_name()
        ))),
    }
}

fn integer(row: &Row, column: &str) -> Result<i64> {
    required(row, column)?.as_i64().ok_or_else(|| {
        StockError::Storage(format!("Column {} does not hold an integer", column))
    })
}

impl TryFrom<&Row> for Item {
    type Error = StockError;

    fn try_from(row: &Row) -> Result<Self> {
        let id = integer(row, COLUMN_ID)?;
        let image = match required(row, COLUMN_IMAGE)? {
            FieldValue::Null => None,
            FieldValue::Blob(bytes) => Some(bytes.clone()),
            // Same bytes SQLite yields for CAST(value AS BLOB).
            FieldValue::Text(s) => Some(s.clone().into_bytes()),
            FieldValue::Integer(n) => Some(n.to_string().into_bytes()),
            FieldValue::Real(f) => Some(f.to_string().into_bytes()),
        };

        Ok(Item {
            id,
            name: text(row, COLUMN_NAME)?,
            price: text(row, COLUMN_PRICE)?,
            quantity: integer(row, COLUMN_QUANTITY)?,
            image,
            supplier_name: text(row, COLUMN_SUPPLIER_NAME)?,
            supplier_email: text(row, COLUMN_SUPPLIER_EMAIL)?,
            supplier_phone: text(row, COLUMN_SUPPLIER_PHONE)?,
        })
    }
}

/// Builder for creating new items.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub price: String,
    /// Left unset to take the store default of 0
    pub quantity: Option<i64>,
    pub image: Option<Vec<u8>>,
    pub supplier_name: String,
    pub supplier_email: String,
    pub supplier_phone: String,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        supplier_name: impl Into<String>,
        supplier_email: impl Into<String>,
        supplier_phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: None,
            image: None,
            supplier_name: supplier_name.into(),
            supplier_email: supplier_email.into(),
            supplier_phone: supplier_phone.into(),
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn to_values(&self) -> ContentValues {
        let mut values = ContentValues::new()
            .with(COLUMN_NAME, self.name.as_str())
            .with(COLUMN_PRICE, self.price.as_str())
            .with(COLUMN_SUPPLIER_NAME, self.supplier_name.as_str())
            .with(COLUMN_SUPPLIER_EMAIL, self.supplier_email.as_str())
            .with(COLUMN_SUPPLIER_PHONE, self.supplier_phone.as_str());
        if let Some(quantity) = self.quantity {
            values.put(COLUMN_QUANTITY, quantity);
        }
        if let Some(ref image) = self.image {
            values.put(COLUMN_IMAGE, image.clone());
        }
        values
    }
}

/// Builder for partial updates. Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    values: ContentValues,
}

impl ItemChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.values.put(COLUMN_NAME, name.into());
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.values.put(COLUMN_PRICE, price.into());
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.values.put(COLUMN_QUANTITY, quantity);
        self
    }

    pub fn image(mut self, image: Vec<u8>) -> Self {
        self.values.put(COLUMN_IMAGE, image);
        self
    }

    pub fn clear_image(mut self) -> Self {
        self.values.put_null(COLUMN_IMAGE);
        self
    }

    pub fn supplier_name(mut self, name: impl Into<String>) -> Self {
        self.values.put(COLUMN_SUPPLIER_NAME, name.into());
        self
    }

    pub fn supplier_email(mut self, email: impl Into<String>) -> Self {
        self.values.put(COLUMN_SUPPLIER_EMAIL, email.into());
        self
    }

    pub fn supplier_phone(mut self, phone: impl Into<String>) -> Self {
        self.values.put(COLUMN_SUPPLIER_PHONE, phone.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> ContentValues {
        self.values
    }
}
