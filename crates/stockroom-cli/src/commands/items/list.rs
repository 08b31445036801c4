use std::cmp::Ordering;

use stockroom_core::contract::{COLUMN_ID, COLUMN_PRICE, COLUMN_SUPPLIER_NAME};
use stockroom_core::{Direction, Item, Query, Selection};

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::errors::CliError;
use crate::helpers::{parse_output_format, parse_sort_column};
use crate::output::{items_json, print_item_list};

/// Numeric price ordering; unparsable prices sort last.
fn compare_price(a: &Item, b: &Item) -> Ordering {
    let parse = |item: &Item| item.price.trim().parse::<f64>().ok();
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.price.cmp(&b.price),
    }
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    if args.json && format.is_some() {
        return Err(CliError::invalid_input("--format cannot be used with --json").into());
    }

    let provider = ctx.provider()?;

    let direction = if args.desc {
        Direction::Descending
    } else {
        Direction::Ascending
    };
    let sort_column = parse_sort_column(args.sort.as_deref().unwrap_or("id"))?;
    // Prices are stored as text, so they are ordered here rather than in SQL.
    let sort_by_price = sort_column == COLUMN_PRICE;

    let mut query = if sort_by_price {
        Query::new().order_by(COLUMN_ID, Direction::Ascending)
    } else {
        Query::new().order_by(sort_column, direction)
    };
    if let Some(ref supplier) = args.supplier {
        query = query.selection(Selection::column_equals(
            COLUMN_SUPPLIER_NAME,
            supplier.as_str(),
        )?);
    }
    if let (Some(limit), false) = (args.limit, sort_by_price) {
        query = query.limit(limit);
    }

    let mut items = provider.list_items(&query)?;
    if sort_by_price {
        items.sort_by(compare_price);
        if args.desc {
            items.reverse();
        }
        if let Some(limit) = args.limit {
            items.truncate(limit);
        }
    }
    tracing::debug!(count = items.len(), "listed items");

    let ui_ctx = ctx.ui_context(args.json, format);
    if ui_ctx.mode.is_json() {
        let output = serde_json::to_string_pretty(&items_json(&items, provider.resolver()))?;
        println!("{}", output);
    } else {
        print_item_list(&ui_ctx, &items, ctx.quiet());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price: &str) -> Item {
        Item {
            id: 1,
            name: "x".into(),
            price: price.into(),
            quantity: 0,
            image: None,
            supplier_name: "s".into(),
            supplier_email: "e".into(),
            supplier_phone: "p".into(),
        }
    }

    #[test]
    fn test_prices_compare_numerically() {
        let mut items = vec![priced("10.00"), priced("free"), priced("9.99")];
        items.sort_by(compare_price);
        let prices: Vec<&str> = items.iter().map(|i| i.price.as_str()).collect();
        assert_eq!(prices, ["9.99", "10.00", "free"]);
    }
}
