use stockroom_core::NewItem;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::read_image;
use crate::ui::{print, receipt};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let provider = ctx.provider()?;

    let mut item = NewItem::new(
        args.name.as_str(),
        args.price.as_str(),
        args.supplier_name.as_str(),
        args.supplier_email.as_str(),
        args.supplier_phone.as_str(),
    );
    if let Some(quantity) = args.quantity {
        item = item.with_quantity(quantity);
    }
    if let Some(ref path) = args.image {
        item = item.with_image(read_image(path)?);
    }

    let collection = provider.resolver().collection_uri();
    let uri = provider
        .insert(&collection, &item.to_values())?
        .ok_or_else(|| CliError::storage_failed("The database refused the new item"))?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false, None);
        let id = provider
            .resolver()
            .resolve(&uri)
            .and_then(|identifier| identifier.id())
            .map(|id| id.to_string())
            .unwrap_or_default();
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Added item", &[("ID", &id), ("URI", &uri)]),
        );
    }
    Ok(())
}
