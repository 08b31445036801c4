//! Confirmation prompts and file input.

use std::path::Path;

use dialoguer::Confirm;

use crate::errors::CliError;
use crate::ui::UiContext;

/// Ask for confirmation before a destructive action.
///
/// `assume_yes` skips the prompt. Without a terminal there is nobody to
/// ask, so the action is refused.
pub fn confirm(ui_ctx: &UiContext, prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !ui_ctx.is_interactive() {
        return Err(CliError::invalid_input(
            "Refusing to delete without confirmation; pass --yes to proceed",
        )
        .into());
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Read an image file into memory.
pub fn read_image(path: &str) -> anyhow::Result<Vec<u8>> {
    let path = Path::new(path);
    std::fs::read(path).map_err(|e| {
        CliError::invalid_input(format!("Failed to read image {}: {}", path.display(), e)).into()
    })
}
