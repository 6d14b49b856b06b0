//! # Tipple Core
//!
//! Core library for Tipple - a local, CLI-first alcohol consumption tracker.
//!
//! This crate provides the domain types, storage abstraction, and limit
//! evaluation independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **storage**: Entry store trait and the SQLite implementation
//! - **units**: Volume conversion and standard drink sizes
//! - **limits**: Threshold rules and BAC estimation

pub mod error;
pub mod fs;
pub mod limits;
pub mod storage;
pub mod units;

pub use error::{Result, TippleError};
pub use limits::{evaluate, evaluate_store, Severity, Thresholds, Warning, SAFE_MESSAGE};
pub use storage::DrinkStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
