//! Text and table output formatting for items.

use stockroom_core::Item;

use crate::ui::{hint, kv, print, table, Column, UiContext};

const LIST_COLUMNS: [Column; 6] = [
    Column::numeric("ID"),
    Column::new("NAME"),
    Column::numeric("PRICE"),
    Column::numeric("QTY"),
    Column::new("SUPPLIER"),
    Column::new("EMAIL"),
];

/// Print a single item in human-readable format.
pub fn print_item(ui_ctx: &UiContext, item: &Item, uri: &str) {
    let image = match &item.image {
        Some(bytes) => format!("{} bytes", bytes.len()),
        None => "none".to_string(),
    };
    let lines = [
        kv(ui_ctx, "ID", &item.id.to_string()),
        kv(ui_ctx, "URI", uri),
        kv(ui_ctx, "Name", &item.name),
        kv(ui_ctx, "Price", &item.price),
        kv(ui_ctx, "Quantity", &item.quantity.to_string()),
        kv(ui_ctx, "Image", &image),
        kv(ui_ctx, "Supplier Name", &item.supplier_name),
        kv(ui_ctx, "Supplier Email", &item.supplier_email),
        kv(ui_ctx, "Supplier Phone", &item.supplier_phone),
    ];
    print(ui_ctx, &lines.join("\n"));
}

/// Print a list of items as a table or plain rows.
pub fn print_item_list(ui_ctx: &UiContext, items: &[Item], quiet: bool) {
    if items.is_empty() {
        if ui_ctx.mode.is_pretty() && !quiet {
            print(ui_ctx, "No items.");
            print(ui_ctx, &hint(ui_ctx, "stockroom add --name <NAME> ..."));
        }
        return;
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.id.to_string(),
                item.name.clone(),
                item.price.clone(),
                item.quantity.to_string(),
                item.supplier_name.clone(),
                item.supplier_email.clone(),
            ]
        })
        .collect();
    print(ui_ctx, &table(ui_ctx, &LIST_COLUMNS, &rows));
}
