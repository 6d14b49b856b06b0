//! Profile lookup with on-demand creation.

use tipple_core::storage::{DrinkStore, UserProfile};
use tracing::info;

use crate::errors::CliError;
use crate::helpers::{prompt_profile, ProfileDraft};
use crate::ui::{badge, Badge, UiContext};

/// Error returned when a profile is needed but none exists.
pub fn missing_profile_error() -> CliError {
    CliError::not_found(
        "No profile found",
        "Hint: Run `tipple profile --name <NAME> --gender <male|female> --weight <KG>` to create one.",
    )
}

/// Return the profile, prompting for one on a TTY if none exists yet.
pub fn require_profile<S: DrinkStore + ?Sized>(
    store: &mut S,
    ui: &UiContext,
    no_input: bool,
) -> anyhow::Result<UserProfile> {
    if let Some(profile) = store.profile()? {
        return Ok(profile);
    }

    if no_input || !ui.is_interactive() {
        return Err(missing_profile_error().into());
    }

    if !ui.mode.is_json() {
        eprintln!("{}", badge(ui, Badge::Info, "No profile yet; let's create one."));
    }
    let new_profile = prompt_profile(&ProfileDraft::default())?;
    let profile = store.create_profile(&new_profile)?;
    info!(name = %profile.name, "created profile");
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use tipple_core::storage::{Gender, NewProfile, SqliteStore};

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_missing_profile_without_tty_fails_with_hint() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let err = require_profile(&mut store, &plain_ctx(), false).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("No profile found"));
        assert!(message.contains("tipple profile"));
    }

    #[test]
    fn test_existing_profile_is_returned() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        store
            .create_profile(&NewProfile::new("Sam", Gender::Male, 75.0))
            .expect("create");
        let profile = require_profile(&mut store, &plain_ctx(), true).expect("profile");
        assert_eq!(profile.weight_kg, 75.0);
    }
}
