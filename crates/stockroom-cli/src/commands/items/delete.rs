use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::{confirm, parse_item_id};
use crate::ui::{badge, print, receipt, Badge, OutputMode};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let target = match args.id.as_deref() {
        Some(id) => Some(parse_item_id(id)?),
        None => None,
    };

    let provider = ctx.provider()?;
    let ui_ctx = ctx.ui_context(false, None);

    let (uri, prompt) = match target {
        Some(id) => {
            let item = provider.get_item(id)?.ok_or_else(|| {
                CliError::not_found(
                    format!("Item {} not found", id),
                    "Hint: Run `stockroom list` to find item IDs.",
                )
            })?;
            (
                provider.resolver().item_uri(id),
                format!("Delete item {} ({})?", id, item.name),
            )
        }
        None => (
            provider.resolver().collection_uri(),
            "Delete every item in the inventory?".to_string(),
        ),
    };

    if !confirm(&ui_ctx, &prompt, args.yes)? {
        if !ctx.quiet() {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "Cancelled"));
                }
                OutputMode::Plain | OutputMode::Json => {
                    println!("status=cancelled");
                }
            }
        }
        return Ok(());
    }

    let deleted = provider.delete(&uri, None)?;
    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Deleted", &[("Count", &deleted.to_string())]),
        );
    }
    Ok(())
}
