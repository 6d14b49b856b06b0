//! Path resolution for config and database files.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::config::{default_config_path, default_db_path, read_config, TippleConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking TIPPLE_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file if it exists. A missing file is not an error.
pub fn load_config() -> anyhow::Result<Option<TippleConfig>> {
    let path = resolve_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(None);
    }
    debug!(path = %path.display(), "loading config");
    read_config(&path).map(Some)
}

/// Resolve the database path: `--db`/`TIPPLE_DB`, then config, then the
/// XDG data directory.
pub fn resolve_db_path(cli: &Cli, config: Option<&TippleConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = config.and_then(|c| c.database.path.as_deref()) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    default_db_path()
}
