use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TippleConfig {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    #[serde(default)]
    pub ascii: bool,
    #[serde(default)]
    pub no_color: bool,
}

impl TippleConfig {
    pub fn new(db_path: &Path) -> Self {
        Self {
            database: DatabaseSection {
                path: Some(db_path.to_string_lossy().to_string()),
            },
            ui: UiSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("tipple.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<TippleConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &TippleConfig) -> anyhow::Result<()> {
    tipple_core::fs::ensure_parent_dir(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create config directory for {}: {}",
            path.display(),
            e
        )
    })?;
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    tipple_core::fs::write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("tipple"));
        }
    }
    Ok(home_dir()?.join(".config").join("tipple"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("tipple"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("tipple"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_config() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("tipple").join("config.toml");
        let config = TippleConfig::new(Path::new("/tmp/drinks.db"));

        write_config(&path, &config).expect("write config");
        let loaded = read_config(&path).expect("read config");

        assert_eq!(loaded.database.path.as_deref(), Some("/tmp/drinks.db"));
        assert!(!loaded.ui.ascii);
        assert!(!loaded.ui.no_color);
    }

    #[test]
    fn test_sections_are_optional() {
        let config: TippleConfig = toml::from_str("[ui]\nascii = true\n").expect("parse");
        assert!(config.database.path.is_none());
        assert!(config.ui.ascii);
        assert!(!config.ui.no_color);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database\npath = 1").expect("write");
        let err = read_config(&path).expect_err("should fail");
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
