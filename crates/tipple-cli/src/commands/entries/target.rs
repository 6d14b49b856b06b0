//! Entry selection by identity key or display position.

use tipple_core::storage::sqlite::PROFILE_ID;
use tipple_core::storage::DrinkStore;
use tracing::debug;

use crate::cli::TargetArgs;
use crate::errors::CliError;
use crate::helpers::select_entry;
use crate::ui::UiContext;

/// Owner of the entries; the profile id once one exists.
pub fn current_user_id<S: DrinkStore + ?Sized>(store: &S) -> anyhow::Result<i64> {
    Ok(store.profile()?.map(|p| p.id).unwrap_or(PROFILE_ID))
}

/// Resolve the entry a command should act on.
///
/// Positions are 1-based in `show` order. A position past the end resolves
/// to `None` so the caller can treat it as a no-op. With neither an ID nor a
/// position, a TTY gets a picker and anything else gets an error.
pub fn resolve_target<S: DrinkStore + ?Sized>(
    store: &S,
    user_id: i64,
    target: &TargetArgs,
    ui: &UiContext,
    prompt: &str,
) -> anyhow::Result<Option<i64>> {
    if let Some(id) = target.id {
        return Ok(Some(id));
    }

    if let Some(position) = target.position {
        if position == 0 {
            return Err(CliError::invalid_input("Positions start at 1").into());
        }
        let entries = store.list(user_id)?;
        let id = entries.get(position - 1).map(|entry| entry.id);
        debug!(position, ?id, "resolved position");
        return Ok(id);
    }

    if ui.is_interactive() {
        let entries = store.list(user_id)?;
        return select_entry(prompt, &entries);
    }

    Err(CliError::invalid_input(
        "No entry given.\nHint: Pass an ID or --position N (see `tipple show`).",
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use chrono::{Duration, Utc};
    use tipple_core::storage::{NewDrink, SqliteStore};

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    fn target(id: Option<i64>, position: Option<usize>) -> TargetArgs {
        TargetArgs { id, position }
    }

    #[test]
    fn test_position_follows_show_order() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let now = Utc::now();
        let older = store
            .add(
                &NewDrink::new("Merlot", "Wine", 5.0).with_added_at(now - Duration::hours(2)),
                1,
            )
            .expect("add");
        let newer = store
            .add(&NewDrink::new("IPA", "Beer", 12.0).with_added_at(now), 1)
            .expect("add");

        let ui = plain_ctx();
        let first = resolve_target(&store, 1, &target(None, Some(1)), &ui, "").expect("resolve");
        let second = resolve_target(&store, 1, &target(None, Some(2)), &ui, "").expect("resolve");
        assert_eq!(first, Some(newer));
        assert_eq!(second, Some(older));
    }

    #[test]
    fn test_position_past_end_is_none() {
        let store = SqliteStore::open_in_memory().expect("open");
        let result =
            resolve_target(&store, 1, &target(None, Some(4)), &plain_ctx(), "").expect("resolve");
        assert_eq!(result, None);
    }

    #[test]
    fn test_position_zero_is_invalid() {
        let store = SqliteStore::open_in_memory().expect("open");
        assert!(resolve_target(&store, 1, &target(None, Some(0)), &plain_ctx(), "").is_err());
    }

    #[test]
    fn test_missing_target_without_tty_errors() {
        let store = SqliteStore::open_in_memory().expect("open");
        let err = resolve_target(&store, 1, &target(None, None), &plain_ctx(), "").unwrap_err();
        assert!(err.to_string().contains("--position"));
    }

    #[test]
    fn test_explicit_id_is_passed_through() {
        let store = SqliteStore::open_in_memory().expect("open");
        let result =
            resolve_target(&store, 1, &target(Some(42), None), &plain_ctx(), "").expect("resolve");
        assert_eq!(result, Some(42));
    }
}
