//! Application context for the Tipple CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use tipple_core::storage::SqliteStore;

use crate::cli::Cli;
use crate::config::TippleConfig;
use crate::ui::UiContext;

use super::resolver::{load_config, resolve_db_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<TippleConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily.
    ///
    /// Returns `Ok(None)` when no config file exists.
    pub fn config(&self) -> anyhow::Result<Option<&TippleConfig>> {
        self.config.get_or_try_init(load_config).map(Option::as_ref)
    }

    /// Build the UI context from flags, config and environment.
    ///
    /// Config errors fall back to defaults so error reporting still works.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        let ui = self.config().ok().flatten().map(|c| &c.ui);
        let no_color = self.cli.no_color || ui.map(|u| u.no_color).unwrap_or(false);
        let ascii = self.cli.ascii || ui.map(|u| u.ascii).unwrap_or(false);
        UiContext::from_env(json, format, no_color, ascii)
    }

    /// Resolve the database path.
    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        resolve_db_path(self.cli, self.config()?)
    }

    /// Open (creating if needed) the drink store.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.db_path()?;
        SqliteStore::open(&path).map_err(|e| {
            anyhow::anyhow!("Failed to open database {}: {}", path.display(), e)
        })
    }
}
