use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use stockroom_core::VERSION;

/// Stockroom - a single-user inventory tracker
#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the inventory database
    #[arg(short, long, global = true, env = "STOCKROOM_DB")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new inventory database and config
    Init(InitArgs),

    /// Add a new item
    Add(AddArgs),

    /// List items
    List(ListArgs),

    /// Show a single item by ID
    Show(ShowArgs),

    /// Change fields of an existing item
    Edit(EditArgs),

    /// Delete one item or every item
    Delete(DeleteArgs),

    /// Print the type descriptor for a content URI
    Type(TypeArgs),

    /// Check database integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// URI authority for this store
    #[arg(long)]
    pub authority: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Item name
    #[arg(long)]
    pub name: String,

    /// Unit price (e.g., "9.99")
    #[arg(long)]
    pub price: String,

    /// Quantity on hand (defaults to 0)
    #[arg(long)]
    pub quantity: Option<i64>,

    /// Supplier name
    #[arg(long)]
    pub supplier_name: String,

    /// Supplier email
    #[arg(long)]
    pub supplier_email: String,

    /// Supplier phone number
    #[arg(long)]
    pub supplier_phone: String,

    /// Attach an image file
    #[arg(long, value_name = "FILE")]
    pub image: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only items from this supplier
    #[arg(long)]
    pub supplier: Option<String>,

    /// Sort column (name, price, quantity, id)
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Item ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Item ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New price
    #[arg(long)]
    pub price: Option<String>,

    /// New quantity
    #[arg(long)]
    pub quantity: Option<i64>,

    /// New supplier name
    #[arg(long)]
    pub supplier_name: Option<String>,

    /// New supplier email
    #[arg(long)]
    pub supplier_email: Option<String>,

    /// New supplier phone number
    #[arg(long)]
    pub supplier_phone: Option<String>,

    /// Replace the image with this file
    #[arg(long, value_name = "FILE", conflicts_with = "clear_image")]
    pub image: Option<String>,

    /// Remove the stored image
    #[arg(long)]
    pub clear_image: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Item ID
    #[arg(value_name = "ID", required_unless_present = "all", conflicts_with = "all")]
    pub id: Option<String>,

    /// Delete every item
    #[arg(long)]
    pub all: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `type` command
#[derive(Args)]
pub struct TypeArgs {
    /// Content URI (e.g., content://com.example.stockroom/inventory/1)
    #[arg(value_name = "URI")]
    pub uri: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}
