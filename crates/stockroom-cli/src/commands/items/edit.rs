use stockroom_core::ItemChanges;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{parse_item_id, read_image};
use crate::ui::{print, receipt};

fn changes_from_args(args: &EditArgs) -> anyhow::Result<ItemChanges> {
    let mut changes = ItemChanges::new();
    if let Some(ref name) = args.name {
        changes = changes.name(name.as_str());
    }
    if let Some(ref price) = args.price {
        changes = changes.price(price.as_str());
    }
    if let Some(quantity) = args.quantity {
        changes = changes.quantity(quantity);
    }
    if let Some(ref supplier_name) = args.supplier_name {
        changes = changes.supplier_name(supplier_name.as_str());
    }
    if let Some(ref supplier_email) = args.supplier_email {
        changes = changes.supplier_email(supplier_email.as_str());
    }
    if let Some(ref supplier_phone) = args.supplier_phone {
        changes = changes.supplier_phone(supplier_phone.as_str());
    }
    if let Some(ref path) = args.image {
        changes = changes.image(read_image(path)?);
    }
    if args.clear_image {
        changes = changes.clear_image();
    }
    Ok(changes)
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let id = parse_item_id(&args.id)?;
    let changes = changes_from_args(args)?;
    if changes.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change.\nHint: Pass at least one field, e.g. --quantity 3.",
        )
        .into());
    }

    let provider = ctx.provider()?;
    let uri = provider.resolver().item_uri(id);
    let updated = provider.update(&uri, &changes.into_values(), None)?;
    if updated == 0 {
        return Err(CliError::not_found(
            format!("Item {} not found", id),
            "Hint: Run `stockroom list` to find item IDs.",
        )
        .into());
    }

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Updated item", &[("ID", &id.to_string()), ("URI", &uri)]),
        );
    }
    Ok(())
}
