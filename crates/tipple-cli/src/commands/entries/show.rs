use tipple_core::limits::{evaluate_store, Thresholds};
use tipple_core::storage::DrinkStore;

use crate::app::{require_profile, AppContext};
use crate::cli::ShowArgs;
use crate::helpers::parse_output_format;
use crate::output::{entries_json, entry_table, print_warnings, summary_json};
use crate::ui::{blank_line, header, note, print, weekly_progress};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    let ui = ctx.ui_context(args.json, format.map(|f| f.as_str()));

    let mut store = ctx.open_store()?;
    let profile = require_profile(&mut store, &ui, false)?;
    let entries = store.list(profile.id)?;
    let (summary, warnings) = evaluate_store(&store, &profile)?;
    let limits = Thresholds::for_gender(profile.gender);

    if ui.mode.is_json() {
        let output = serde_json::json!({
            "entries": entries_json(&entries),
            "summary": summary_json(&summary, &limits, &warnings),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !ctx.quiet() {
        print(&ui, &header(&ui, "show", Some(&profile.name)));
        blank_line(&ui);
    }

    if entries.is_empty() {
        if !ctx.quiet() {
            print(&ui, &note(&ui, "No drinks recorded yet."));
        }
    } else {
        print(&ui, &entry_table(&ui, &entries));
    }

    if !ctx.quiet() {
        blank_line(&ui);
        weekly_progress(&ui, summary.weekly_oz, limits.weekly_oz)?;
    }
    print_warnings(&ui, &warnings);
    Ok(())
}
