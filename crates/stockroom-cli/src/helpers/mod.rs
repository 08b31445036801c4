//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Confirmation prompts and image file reading (`input`)
//! - Item ID, sort column, and output format parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{confirm, read_image};
pub use parsing::{parse_item_id, parse_output_format, parse_sort_column, OutputFormat};
