//! UI primitives for the Tipple CLI.
//!
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, category colors, symbols
//! - **Render**: Tables, headers, receipts, hints, warnings
//! - **Progress**: Weekly limit bar
//! - **Format**: String and number formatting

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, header, hint, kv, note, print, print_error, receipt, table, Column,
};

pub use progress::weekly_progress;

pub use format::{format_datetime, format_oz, truncate};
