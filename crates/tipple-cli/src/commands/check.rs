use tipple_core::limits::{evaluate_store, Thresholds};
use tipple_core::storage::BINGE_WINDOW_HOURS;

use crate::app::{require_profile, AppContext};
use crate::cli::CheckArgs;
use crate::output::{print_warnings, summary_json};
use crate::ui::{blank_line, format_oz, header, kv, print};

pub fn handle_check(ctx: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let mut store = ctx.open_store()?;
    let profile = require_profile(&mut store, &ui, false)?;
    let (summary, warnings) = evaluate_store(&store, &profile)?;
    let limits = Thresholds::for_gender(profile.gender);

    if ui.mode.is_json() {
        let output = summary_json(&summary, &limits, &warnings);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !ctx.quiet() {
        let window = format!("Last {}h oz", BINGE_WINDOW_HOURS);
        print(&ui, &header(&ui, "check", Some(&profile.name)));
        blank_line(&ui);
        print(
            &ui,
            &kv(
                &ui,
                "Weekly oz",
                &format!("{}/{}", format_oz(summary.weekly_oz), limits.weekly_oz),
            ),
        );
        print(
            &ui,
            &kv(
                &ui,
                "Daily oz",
                &format!("{}/{}", format_oz(summary.daily_oz), limits.daily_oz),
            ),
        );
        print(
            &ui,
            &kv(
                &ui,
                &window,
                &format!("{}/{}", format_oz(summary.last_hours_oz), limits.binge_oz),
            ),
        );
        blank_line(&ui);
    }

    print_warnings(&ui, &warnings);
    Ok(())
}
