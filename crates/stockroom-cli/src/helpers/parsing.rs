//! Parsing helpers for item IDs, sort columns, and output format.

use stockroom_core::contract::{COLUMN_ID, COLUMN_NAME, COLUMN_PRICE, COLUMN_QUANTITY};

use crate::errors::CliError;

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Parse output format string.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

/// Parse an item ID (a non-negative integer).
pub fn parse_item_id(value: &str) -> anyhow::Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 0)
        .ok_or_else(|| {
            CliError::invalid_input(format!(
                "Invalid item ID: {} (expected a non-negative integer)",
                value
            ))
            .into()
        })
}

/// Map a `--sort` value to its column.
pub fn parse_sort_column(value: &str) -> anyhow::Result<&'static str> {
    match value {
        "id" => Ok(COLUMN_ID),
        "name" => Ok(COLUMN_NAME),
        "price" => Ok(COLUMN_PRICE),
        "quantity" | "qty" => Ok(COLUMN_QUANTITY),
        other => Err(CliError::invalid_input(format!(
            "Unsupported sort column: {} (use name, price, quantity or id)",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(None).unwrap(), None);
        assert_eq!(parse_output_format(Some("plain")).unwrap(), Some(OutputFormat::Plain));
        assert_eq!(parse_output_format(Some("table")).unwrap(), Some(OutputFormat::Table));
        assert!(parse_output_format(Some("csv")).is_err());
    }

    #[test]
    fn test_parse_item_id() {
        assert_eq!(parse_item_id("42").unwrap(), 42);
        assert_eq!(parse_item_id(" 7 ").unwrap(), 7);
        assert!(parse_item_id("-1").is_err());
        assert!(parse_item_id("abc").is_err());
        assert!(parse_item_id("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_sort_column() {
        assert_eq!(parse_sort_column("qty").unwrap(), COLUMN_QUANTITY);
        assert_eq!(parse_sort_column("id").unwrap(), COLUMN_ID);
        let err = parse_sort_column("colour").unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
