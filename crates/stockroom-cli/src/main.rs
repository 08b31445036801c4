//! Stockroom CLI - a single-user inventory tracker
//!
//! This is the command-line interface for Stockroom. It drives the core
//! inventory provider from the shell.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use stockroom_core::{StockError, VERSION};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, items, maintenance, misc};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    // A broken config surfaces later, from the command that needs it.
    let config_filter = ctx
        .config()
        .ok()
        .flatten()
        .and_then(|config| config.log.filter.clone());
    init_logging(&cli, config_filter.as_deref());

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        let error_msg = format!("{}", e);
        let (message, hint) = split_hint(&error_msg);
        let hint = hint.map(String::from).or_else(|| contextual_hint(&e));

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Install the stderr log subscriber.
///
/// Filter precedence: `--verbose`, then `RUST_LOG`, then the config file,
/// then `warn`.
fn init_logging(cli: &Cli, config_filter: Option<&str>) {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else {
        EnvFilter::new(config_filter.unwrap_or("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Split an error message at an embedded "Hint:" line.
fn split_hint(error: &str) -> (&str, Option<&str>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(&error[idx + 1..])),
        None => (error, None),
    }
}

/// Hints for core errors that carry none of their own.
fn contextual_hint(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<StockError>()? {
        StockError::InvalidIdentifier(_) => Some(
            "Hint: URIs look like content://<authority>/inventory or content://<authority>/inventory/<id>."
                .to_string(),
        ),
        StockError::InvalidArgument { field, .. } if field == "quantity" => {
            Some("Hint: Quantity must be a whole number of zero or more.".to_string())
        }
        StockError::Storage(_) => Some(
            "Hint: Run `stockroom check` to verify the database file.".to_string(),
        ),
        _ => None,
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            items::handle_add(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            items::handle_list(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            items::handle_show(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            items::handle_edit(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            items::handle_delete(ctx, args)?;
        }
        Some(Commands::Type(args)) => {
            misc::handle_type(ctx, args)?;
        }
        Some(Commands::Check) => {
            maintenance::handle_check(ctx)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Stockroom v{}", VERSION);
            println!("\nQuickstart:");
            println!("  stockroom init");
            println!(
                "  stockroom add --name Widget --price 9.99 --quantity 5 \\\n      --supplier-name Acme --supplier-email a@acme.com --supplier-phone 555-0100"
            );
            println!("  stockroom list");
            println!("  stockroom show <id>");
            println!("\nRun `stockroom --help` for full usage.");
        }
    }

    Ok(())
}
