use stockroom_core::StorageEngine;

use crate::app::AppContext;
use crate::errors::CliError;
use crate::ui::{badge, kv, print, Badge};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let provider = ctx.provider()?;
    let storage = provider.storage();
    let ui_ctx = ctx.ui_context(false, None);

    match storage.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                let version = storage.schema_version()?;
                if ui_ctx.mode.is_pretty() {
                    print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "Integrity check passed"));
                    print(&ui_ctx, &format!("  {}", kv(&ui_ctx, "Schema", &version.to_string())));
                } else {
                    println!("status=ok");
                    println!("{}", kv(&ui_ctx, "Schema", &version.to_string()));
                }
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            Err(CliError::storage_failed(
                "Integrity check failed\nHint: Restore from a backup copy of the database file.",
            )
            .into())
        }
    }
}
