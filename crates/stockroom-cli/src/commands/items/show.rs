use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::CliError;
use crate::helpers::parse_item_id;
use crate::output::{item_json, print_item};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_item_id(&args.id)?;
    let provider = ctx.provider()?;

    let item = provider.get_item(id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Item {} not found", id),
            "Hint: Run `stockroom list` to find item IDs.",
        )
    })?;

    let ui_ctx = ctx.ui_context(args.json, None);
    if ui_ctx.mode.is_json() {
        let output = serde_json::to_string_pretty(&item_json(&item, provider.resolver()))?;
        println!("{}", output);
    } else {
        print_item(&ui_ctx, &item, &provider.resolver().item_uri(item.id));
    }
    Ok(())
}
