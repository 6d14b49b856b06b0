use tipple_core::storage::DrinkStore;
use tipple_core::units::canonical_category;
use tracing::info;

use crate::app::AppContext;
use crate::cli::UpdateArgs;
use crate::errors::CliError;
use crate::ui::{note, print, receipt};

use super::target::{current_user_id, resolve_target};

pub fn handle_update(ctx: &AppContext, args: &UpdateArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);

    let drink = args.drink.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let category = args
        .category
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| canonical_category(v).unwrap_or(v));
    if drink.is_none() && category.is_none() {
        return Err(CliError::invalid_input(
            "Nothing to update.\nHint: Pass --drink and/or --category.",
        )
        .into());
    }

    let mut store = ctx.open_store()?;
    let user_id = current_user_id(&store)?;

    let updated = match resolve_target(&store, user_id, &args.target, &ui, "Update which drink?")? {
        Some(id) => store.update(id, drink, category)?.then_some(id),
        None => None,
    };

    if ctx.quiet() {
        return Ok(());
    }
    match updated {
        Some(id) => {
            info!(id, "updated drink");
            let id_text = id.to_string();
            let mut items = vec![("Entry ID", id_text.as_str())];
            if let Some(value) = drink {
                items.push(("Drink", value));
            }
            if let Some(value) = category {
                items.push(("Category", value));
            }
            print(&ui, &receipt(&ui, "Drink updated", &items));
        }
        None => print(&ui, &note(&ui, "No matching drink; nothing updated.")),
    }
    Ok(())
}
