//! Request types shared by the provider and storage engines.

use crate::contract::{is_known_column, COLUMN_ID};
use crate::error::{Result, StockError};
use crate::values::FieldValue;

/// A filter predicate: an SQL condition with `?` placeholders plus the
/// values bound to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub clause: String,
    pub args: Vec<FieldValue>,
}

impl Selection {
    pub fn new(clause: impl Into<String>, args: Vec<FieldValue>) -> Self {
        Self {
            clause: clause.into(),
            args,
        }
    }

    /// Match exactly one row by id.
    pub fn id_equals(id: i64) -> Self {
        Self::new(format!("{} = ?", COLUMN_ID), vec![FieldValue::Integer(id)])
    }

    /// Match rows whose `column` equals `value`.
    ///
    /// Fails when `column` is not an inventory column.
    pub fn column_equals(column: &str, value: impl Into<FieldValue>) -> Result<Self> {
        if !is_known_column(column) {
            return Err(StockError::invalid_argument(column, "unknown column"));
        }
        Ok(Self::new(format!("{} = ?", column), vec![value.into()]))
    }
}

/// Sort direction for one ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// Parameters for a read: projection, filter, ordering and limit.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Columns to return; all columns when unset
    pub projection: Option<Vec<String>>,

    /// Row filter
    pub selection: Option<Selection>,

    /// Ordering terms, applied in order
    pub order_by: Vec<(String, Direction)>,

    /// Maximum number of rows
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projection<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check that every projected and ordering column exists.
    pub fn validate_columns(&self) -> Result<()> {
        let projected = self.projection.iter().flatten();
        let ordered = self.order_by.iter().map(|(column, _)| column);
        for column in projected.chain(ordered) {
            if !is_known_column(column) {
                return Err(StockError::invalid_argument(column.as_str(), "unknown column"));
            }
        }
        Ok(())
    }
}
