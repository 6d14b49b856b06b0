use tipple_core::storage::{DrinkStore, SqliteStore};

use crate::app::{resolve_config_path, AppContext};
use crate::ui::{badge, print, Badge};

pub fn handle_doctor(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let config_path = resolve_config_path()?;

    let config_line = match ctx.config() {
        Ok(Some(_)) => badge(&ui, Badge::Ok, &format!("config: {}", config_path.display())),
        Ok(None) => badge(
            &ui,
            Badge::Info,
            &format!("config: none at {} (using defaults)", config_path.display()),
        ),
        Err(err) => {
            print(&ui, &badge(&ui, Badge::Err, &format!("config: {}", err)));
            return Err(anyhow::anyhow!(
                "Doctor failed: config is unreadable\nHint: Fix or remove {} and re-run.",
                config_path.display()
            ));
        }
    };

    let db_path = ctx.db_path()?;
    if !db_path.exists() {
        if !ctx.quiet() {
            print(&ui, &config_line);
        }
        return Err(anyhow::anyhow!(
            "Database not found at {}\nHint: Run `tipple init` to create it.",
            db_path.display()
        ));
    }

    let store = SqliteStore::open(&db_path)?;
    if let Err(err) = store.check_integrity() {
        print(&ui, &badge(&ui, Badge::Err, &format!("integrity: {}", err)));
        return Err(anyhow::anyhow!(
            "Integrity check failed\nHint: Restore the database from a backup."
        ));
    }

    if ctx.quiet() {
        return Ok(());
    }

    let version = store.format_version()?;
    let (profile_line, entries) = match store.profile()? {
        Some(profile) => (
            badge(&ui, Badge::Ok, &format!("profile: {}", profile.name)),
            store.list(profile.id)?.len(),
        ),
        None => (
            badge(
                &ui,
                Badge::Warn,
                "profile: none (run `tipple profile` to create one)",
            ),
            0,
        ),
    };

    print(&ui, &config_line);
    print(
        &ui,
        &badge(
            &ui,
            Badge::Ok,
            &format!("database: {} (format v{})", db_path.display(), version),
        ),
    );
    print(&ui, &badge(&ui, Badge::Ok, "integrity: ok"));
    print(&ui, &profile_line);
    print(&ui, &badge(&ui, Badge::Info, &format!("entries: {}", entries)));
    Ok(())
}
