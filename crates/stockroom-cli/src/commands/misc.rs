use clap::CommandFactory;
use clap_complete::generate;

use stockroom_core::{InventoryProvider, SqliteStorage};

use crate::app::AppContext;
use crate::cli::{Cli, CompletionsArgs, TypeArgs};

pub fn handle_completions(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "stockroom", &mut std::io::stdout());
    Ok(())
}

pub fn handle_type(ctx: &AppContext, args: &TypeArgs) -> anyhow::Result<()> {
    // Type descriptors depend only on the authority; storage stays closed.
    let provider = InventoryProvider::new(SqliteStorage::in_memory(), ctx.resolver()?);
    println!("{}", provider.get_type(&args.uri)?);
    Ok(())
}
