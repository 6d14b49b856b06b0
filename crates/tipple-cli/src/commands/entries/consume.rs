use chrono::Utc;
use tipple_core::limits::evaluate_store;
use tipple_core::storage::DrinkStore;
use tracing::info;

use crate::app::{require_profile, AppContext};
use crate::cli::ConsumeArgs;
use crate::helpers::parse_datetime;
use crate::output::print_warnings;
use crate::ui::{blank_line, format_datetime, note, print, receipt};

use super::target::resolve_target;

pub fn handle_consume(ctx: &AppContext, args: &ConsumeArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let when = match args.at.as_deref() {
        Some(value) => parse_datetime(value)?,
        None => Utc::now(),
    };

    let mut store = ctx.open_store()?;
    let profile = require_profile(&mut store, &ui, false)?;

    let consumed = match resolve_target(
        &store,
        profile.id,
        &args.target,
        &ui,
        "Consume which drink?",
    )? {
        Some(id) => store.mark_consumed_at(id, when)?.then_some(id),
        None => None,
    };

    if !ctx.quiet() {
        match consumed {
            Some(id) => {
                info!(id, "consumed drink");
                let id_text = id.to_string();
                let when_text = format_datetime(&when, ui.mode.is_pretty());
                print(
                    &ui,
                    &receipt(
                        &ui,
                        "Drink consumed",
                        &[("Entry ID", id_text.as_str()), ("Consumed at", when_text.as_str())],
                    ),
                );
            }
            None => print(&ui, &note(&ui, "No matching drink; nothing consumed.")),
        }
        blank_line(&ui);
    }

    let (_summary, warnings) = evaluate_store(&store, &profile)?;
    print_warnings(&ui, &warnings);
    Ok(())
}
