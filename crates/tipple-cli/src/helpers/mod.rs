//! Input and parsing helper functions for the CLI.
//!
//! - Interactive prompts for drinks and the profile (`input`)
//! - Datetime and format parsing (`parsing`)

mod input;
mod parsing;

pub use input::{
    prompt_amount, prompt_category, prompt_drink, prompt_profile, prompt_quantity, select_entry,
    ProfileDraft,
};
pub use parsing::{parse_datetime, parse_output_format};
