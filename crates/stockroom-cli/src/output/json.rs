//! JSON output formatting for items.

use stockroom_core::{Item, UriResolver};

/// Convert an item to JSON for output.
///
/// Image bytes are summarised by length.
pub fn item_json(item: &Item, resolver: &UriResolver) -> serde_json::Value {
    serde_json::json!({
        "id": item.id,
        "uri": resolver.item_uri(item.id),
        "name": item.name,
        "price": item.price,
        "quantity": item.quantity,
        "image_bytes": item.image.as_ref().map(Vec::len),
        "supplier_name": item.supplier_name,
        "supplier_email": item.supplier_email,
        "supplier_phone": item.supplier_phone,
    })
}

/// Convert multiple items to JSON array for output.
pub fn items_json(items: &[Item], resolver: &UriResolver) -> Vec<serde_json::Value> {
    items.iter().map(|item| item_json(item, resolver)).collect()
}
