//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying items
//! in various formats (JSON, table, plain text).

mod json;
mod text;

// Re-export public API
pub use json::{item_json, items_json};
pub use text::{print_item, print_item_list};
