//! Application-level utilities for the Tipple CLI.
//!
//! - Path resolution for the config and database files
//! - The lazily-loaded application context
//! - Profile lookup with on-demand creation

mod context;
mod profile;
mod resolver;

pub use context::AppContext;
pub use profile::{missing_profile_error, require_profile};
pub use resolver::resolve_config_path;
