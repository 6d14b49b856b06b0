//! Human and plain-text output.

use tipple_core::limits::{Severity, Warning, SAFE_MESSAGE};
use tipple_core::storage::{DrinkEntry, UserProfile};

use crate::ui::theme::{category_color, CONSUMED, PENDING};
use crate::ui::{badge, format_datetime, format_oz, kv, table, truncate, Badge, Column, UiContext};

const DRINK_WIDTH: usize = 24;

const ENTRY_COLUMNS: [Column; 9] = [
    Column::new("#"),
    Column::new("ID"),
    Column::new("Drink"),
    Column::with_color("Category", category_color),
    Column::new("Qty"),
    Column::new("Oz"),
    Column::new("Added"),
    Column::new("Consumed"),
    Column::new("Done"),
];

/// Render entries in display order with 1-based positions.
pub fn entry_table(ui: &UiContext, entries: &[DrinkEntry]) -> String {
    let pretty = ui.mode.is_pretty();
    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let drink = if pretty {
                truncate(&entry.drink, DRINK_WIDTH)
            } else {
                crate::ui::format::single_line(&entry.drink)
            };
            let consumed = entry
                .date_consumed
                .map(|dt| format_datetime(&dt, pretty))
                .unwrap_or_else(|| "-".to_string());
            let done = if entry.is_consumed() {
                CONSUMED.get(ui.unicode)
            } else {
                PENDING.get(ui.unicode)
            };
            vec![
                (index + 1).to_string(),
                entry.id.to_string(),
                drink,
                entry.category.clone(),
                entry.quantity.to_string(),
                format_oz(entry.total_oz()),
                format_datetime(&entry.date_added, pretty),
                consumed,
                done.to_string(),
            ]
        })
        .collect();
    table(ui, &ENTRY_COLUMNS, &rows)
}

/// Badge for one warning line.
pub fn warning_badge(ui: &UiContext, warning: &Warning) -> String {
    let kind = match warning.severity() {
        Severity::Danger => Badge::Err,
        Severity::Caution => Badge::Warn,
    };
    badge(ui, kind, &warning.to_string())
}

/// Print warnings, or the safe state when there are none.
///
/// Pretty: one badge per warning. Plain: `warning=<text>` lines, or
/// `status=ok` and `message=<text>`.
pub fn print_warnings(ui: &UiContext, warnings: &[Warning]) {
    if ui.mode.is_json() {
        return;
    }

    if warnings.is_empty() {
        if ui.mode.is_pretty() {
            println!("{}", badge(ui, Badge::Ok, SAFE_MESSAGE));
        } else {
            println!("status=ok");
            println!("message={}", SAFE_MESSAGE);
        }
        return;
    }

    for warning in warnings {
        if ui.mode.is_pretty() {
            println!("{}", warning_badge(ui, warning));
        } else {
            println!("warning={}", warning);
        }
    }
}

pub fn print_profile(ui: &UiContext, profile: &UserProfile) {
    println!("{}", kv(ui, "Name", &profile.name));
    println!("{}", kv(ui, "Gender", profile.gender.as_str()));
    println!("{}", kv(ui, "Weight kg", &format!("{}", profile.weight_kg)));
    println!(
        "{}",
        kv(ui, "Created", &format_datetime(&profile.created_at, ui.mode.is_pretty()))
    );
}
