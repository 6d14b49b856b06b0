use tipple_core::storage::DrinkStore;
use tracing::info;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::ui::{note, print, receipt};

use super::target::{current_user_id, resolve_target};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let mut store = ctx.open_store()?;
    let user_id = current_user_id(&store)?;

    let deleted = match resolve_target(&store, user_id, &args.target, &ui, "Delete which drink?")? {
        Some(id) => store.delete(id)?.then_some(id),
        None => None,
    };

    if ctx.quiet() {
        return Ok(());
    }
    match deleted {
        Some(id) => {
            info!(id, "deleted drink");
            let id_text = id.to_string();
            print(&ui, &receipt(&ui, "Drink deleted", &[("Entry ID", id_text.as_str())]));
        }
        None => print(&ui, &note(&ui, "No matching drink; nothing deleted.")),
    }
    Ok(())
}
