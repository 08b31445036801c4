//! Field validation for inventory writes.
//!
//! One validator per column, shared by insert (every writable column,
//! required ones must be present) and update (only the columns supplied).

use crate::contract::{
    is_known_column, COLUMN_ID, COLUMN_IMAGE, COLUMN_NAME, COLUMN_PRICE, COLUMN_QUANTITY,
    COLUMN_SUPPLIER_EMAIL, COLUMN_SUPPLIER_NAME, COLUMN_SUPPLIER_PHONE, WRITABLE_COLUMNS,
};
use crate::error::{Result, StockError};
use crate::values::{ContentValues, FieldValue};

/// Requirement message for a missing or null required column.
fn requirement(column: &str) -> &'static str {
    match column {
        COLUMN_NAME => "Item requires a name",
        COLUMN_PRICE => "Item requires a price",
        COLUMN_SUPPLIER_NAME => "Item requires a supplier name",
        COLUMN_SUPPLIER_EMAIL => "Item requires a supplier email",
        COLUMN_SUPPLIER_PHONE => "Item requires a supplier phone number",
        _ => "Item requires a value",
    }
}

fn is_required(column: &str) -> bool {
    column != COLUMN_QUANTITY && column != COLUMN_IMAGE
}

/// Validate one column value and return the value to store.
fn validate_field(column: &str, value: &FieldValue) -> Result<FieldValue> {
    match column {
        COLUMN_IMAGE => Ok(value.clone()),
        COLUMN_QUANTITY => validate_quantity(value),
        _ => validate_required_text(column, value),
    }
}

fn validate_required_text(column: &str, value: &FieldValue) -> Result<FieldValue> {
    match value {
        FieldValue::Text(_) => Ok(value.clone()),
        FieldValue::Integer(n) => Ok(FieldValue::Text(n.to_string())),
        FieldValue::Real(f) => Ok(FieldValue::Text(f.to_string())),
        FieldValue::Null => Err(StockError::invalid_argument(column, requirement(column))),
        FieldValue::Blob(_) => Err(StockError::invalid_argument(
            column,
            format!("{} must be text, got {}", column, value.type_name()),
        )),
    }
}

fn validate_quantity(value: &FieldValue) -> Result<FieldValue> {
    let quantity = match value {
        FieldValue::Integer(n) => Some(*n),
        FieldValue::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match quantity {
        Some(n) if n >= 0 => Ok(FieldValue::Integer(n)),
        Some(n) => Err(StockError::invalid_argument(
            COLUMN_QUANTITY,
            format!("Item requires valid quantity (got {})", n),
        )),
        None => Err(StockError::invalid_argument(
            COLUMN_QUANTITY,
            format!(
                "Item requires valid quantity (got {})",
                value.type_name()
            ),
        )),
    }
}

/// Reject the row id and anything that is not a column.
fn check_columns(values: &ContentValues) -> Result<()> {
    for column in values.keys() {
        if column == COLUMN_ID {
            return Err(StockError::invalid_argument(
                column,
                "row id is assigned by the store and cannot be written",
            ));
        }
        if !is_known_column(column) {
            return Err(StockError::invalid_argument(column, "unknown column"));
        }
    }
    Ok(())
}

/// Validate a full insert and return the values to store.
///
/// Columns are checked in table order so the first failing column is the
/// one reported; unknown columns are reported after every known one passes.
/// An absent quantity becomes 0.
pub fn sanitize_insert(values: &ContentValues) -> Result<ContentValues> {
    let mut sanitized = ContentValues::new();
    for column in WRITABLE_COLUMNS {
        match values.get(column) {
            Some(value) => sanitized.put(column, validate_field(column, value)?),
            None if column == COLUMN_QUANTITY => sanitized.put(column, 0),
            None if is_required(column) => {
                return Err(StockError::invalid_argument(column, requirement(column)))
            }
            None => {}
        }
    }
    check_columns(values)?;
    Ok(sanitized)
}

/// Validate a partial update and return the values to store.
///
/// Only supplied columns are checked; absent ones are left out entirely.
pub fn sanitize_update(values: &ContentValues) -> Result<ContentValues> {
    let mut sanitized = ContentValues::new();
    for column in WRITABLE_COLUMNS {
        if let Some(value) = values.get(column) {
            sanitized.put(column, validate_field(column, value)?);
        }
    }
    check_columns(values)?;
    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ContentValues {
        ContentValues::new()
            .with(COLUMN_NAME, "Widget")
            .with(COLUMN_PRICE, "9.99")
            .with(COLUMN_QUANTITY, 5)
            .with(COLUMN_SUPPLIER_NAME, "Acme")
            .with(COLUMN_SUPPLIER_EMAIL, "a@acme.com")
            .with(COLUMN_SUPPLIER_PHONE, "555-0100")
    }

    fn insert_error_field(values: &ContentValues) -> String {
        sanitize_insert(values)
            .unwrap_err()
            .field()
            .expect("should be an argument error")
            .to_string()
    }

    #[test]
    fn test_insert_accepts_complete_values() {
        let sanitized = sanitize_insert(&complete()).unwrap();
        assert_eq!(sanitized, complete());
    }

    #[test]
    fn test_insert_defaults_quantity() {
        let mut values = complete();
        values.remove(COLUMN_QUANTITY);
        let sanitized = sanitize_insert(&values).unwrap();
        assert_eq!(sanitized.get(COLUMN_QUANTITY), Some(&FieldValue::Integer(0)));
    }

    #[test]
    fn test_insert_reports_missing_fields_in_order() {
        let mut values = complete();
        values.remove(COLUMN_NAME);
        values.remove(COLUMN_SUPPLIER_PHONE);
        assert_eq!(insert_error_field(&values), COLUMN_NAME);

        let mut values = complete();
        values.put_null(COLUMN_PRICE);
        assert_eq!(insert_error_field(&values), COLUMN_PRICE);

        for column in [COLUMN_SUPPLIER_NAME, COLUMN_SUPPLIER_EMAIL, COLUMN_SUPPLIER_PHONE] {
            let mut values = complete();
            values.remove(column);
            assert_eq!(insert_error_field(&values), column);
        }
    }

    #[test]
    fn test_quantity_rules() {
        let with_quantity = |q: FieldValue| complete().with(COLUMN_QUANTITY, q);

        assert_eq!(insert_error_field(&with_quantity(FieldValue::Integer(-1))), COLUMN_QUANTITY);
        assert_eq!(insert_error_field(&with_quantity(FieldValue::Null)), COLUMN_QUANTITY);
        assert_eq!(insert_error_field(&with_quantity("lots".into())), COLUMN_QUANTITY);
        assert_eq!(insert_error_field(&with_quantity(FieldValue::Real(1.5))), COLUMN_QUANTITY);

        let sanitized = sanitize_insert(&with_quantity(" 12 ".into())).unwrap();
        assert_eq!(sanitized.get(COLUMN_QUANTITY), Some(&FieldValue::Integer(12)));
    }

    #[test]
    fn test_image_is_unconstrained() {
        for image in [
            FieldValue::Null,
            FieldValue::Blob(vec![1, 2, 3]),
            FieldValue::Text("not really an image".into()),
        ] {
            let values = complete().with(COLUMN_IMAGE, image.clone());
            let sanitized = sanitize_insert(&values).unwrap();
            assert_eq!(sanitized.get(COLUMN_IMAGE), Some(&image));
        }
    }

    #[test]
    fn test_numbers_are_coerced_to_text() {
        let values = complete().with(COLUMN_PRICE, 10);
        let sanitized = sanitize_insert(&values).unwrap();
        assert_eq!(sanitized.get(COLUMN_PRICE), Some(&FieldValue::Text("10".into())));
    }

    #[test]
    fn test_row_id_and_unknown_columns_rejected() {
        assert_eq!(insert_error_field(&complete().with(COLUMN_ID, 7)), COLUMN_ID);
        assert_eq!(insert_error_field(&complete().with("colour", "red")), "colour");

        let err = sanitize_update(&ContentValues::new().with(COLUMN_ID, 1)).unwrap_err();
        assert_eq!(err.field(), Some(COLUMN_ID));
    }

    #[test]
    fn test_known_fields_are_reported_before_unknown_columns() {
        let mut values = complete().with("colour", "red");
        values.remove(COLUMN_NAME);
        assert_eq!(insert_error_field(&values), COLUMN_NAME);

        let values = ContentValues::new()
            .with("colour", "red")
            .with(COLUMN_QUANTITY, -1);
        let err = sanitize_update(&values).unwrap_err();
        assert_eq!(err.field(), Some(COLUMN_QUANTITY));
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        let sanitized = sanitize_update(&ContentValues::new().with(COLUMN_PRICE, "2.00")).unwrap();
        assert_eq!(sanitized.len(), 1);

        let err = sanitize_update(&ContentValues::new().with(COLUMN_QUANTITY, -3)).unwrap_err();
        assert_eq!(err.field(), Some(COLUMN_QUANTITY));

        let mut values = ContentValues::new();
        values.put_null(COLUMN_SUPPLIER_EMAIL);
        let err = sanitize_update(&values).unwrap_err();
        assert_eq!(err.field(), Some(COLUMN_SUPPLIER_EMAIL));

        assert!(sanitize_update(&ContentValues::new()).unwrap().is_empty());
    }
}
