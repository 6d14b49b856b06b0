//! Output formatting helpers for the CLI.

mod json;
mod text;

pub use json::{entries_json, profile_json, summary_json};
pub use text::{entry_table, print_profile, print_warnings};
