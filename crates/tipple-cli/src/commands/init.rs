use std::path::PathBuf;

use tipple_core::storage::{DrinkStore, SqliteStore};
use tracing::info;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_db_path, write_config, TippleConfig};
use crate::errors::CliError;
use crate::ui::{blank_line, hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let config_path = resolve_config_path()?;

    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Re-run with --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let db_path = match args.path.as_deref().or(ctx.cli().db.as_deref()) {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => default_db_path()?,
    };

    let store = SqliteStore::open(&db_path)
        .map_err(|e| anyhow::anyhow!("Failed to create database {}: {}", db_path.display(), e))?;
    let version = store.format_version()?;
    let has_profile = store.profile()?.is_some();

    write_config(&config_path, &TippleConfig::new(&db_path))?;
    info!(config = %config_path.display(), db = %db_path.display(), "initialized");

    if ctx.quiet() {
        return Ok(());
    }

    let config_text = config_path.display().to_string();
    let db_text = db_path.display().to_string();
    print(
        &ui,
        &receipt(
            &ui,
            "Tipple initialized",
            &[
                ("Config", config_text.as_str()),
                ("Database", db_text.as_str()),
                ("Format version", version.as_str()),
            ],
        ),
    );
    if !has_profile {
        blank_line(&ui);
        print(
            &ui,
            &hint(
                &ui,
                "tipple profile --name <NAME> --gender <male|female> --weight <KG>",
            ),
        );
    }
    Ok(())
}
