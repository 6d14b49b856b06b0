//! Rendering primitives for CLI output.
//!
//! Every function returns the text for the current mode; pretty output is
//! decorated, plain output stays `key=value` so scripts can grep it.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Command title: `Tipple · show (Sam)` when pretty, `tipple show` when plain.
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Json => String::new(),
        OutputMode::Plain => format!("tipple {}", command),
        OutputMode::Pretty => {
            let title = styled("Tipple", styles::bold(), ctx.color);
            let suffix = context.map(|c| format!(" ({})", c)).unwrap_or_default();
            format!("{} \u{00B7} {}{}", title, command, suffix)
        }
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let token = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    match message {
        "" => token,
        _ => format!("{} {}", token, message),
    }
}

/// Turn a display label into a plain-mode key: `Weekly oz` -> `weekly_oz`.
fn plain_key(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}

/// Dim `label` in pretty mode or emit `key=text` in plain mode.
fn labelled(ctx: &UiContext, label: &str, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled(label, styles::dim(), ctx.color), text)
    } else {
        format!("{}={}", plain_key(label.trim_end_matches(':')), text)
    }
}

pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    labelled(ctx, &format!("{}:", key), value)
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    labelled(ctx, "Hint:", text)
}

/// Low-key informational line, e.g. when a target matched nothing.
pub fn note(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        styled(text, styles::dim(), ctx.color)
    } else {
        format!("note={}", text)
    }
}

/// Summary block printed after a successful mutation.
///
/// Plain output always starts with `status=ok`.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let (first, indent) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Ok, title), "  ")
    } else {
        ("status=ok".to_string(), "")
    };

    std::iter::once(first)
        .chain(
            items
                .iter()
                .map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table column; `color` picks a foreground from the cell text.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub color: Option<fn(&str) -> Color>,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            color: None,
        }
    }

    pub const fn with_color(header: &'static str, color: fn(&str) -> Color) -> Self {
        Self {
            header,
            color: Some(color),
        }
    }
}

/// Bordered table when pretty; headerless tab-separated rows otherwise.
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }
    boxed_table(ctx, columns, rows).to_string()
}

fn boxed_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(u16::try_from(ctx.width).unwrap_or(u16::MAX));

    table.set_header(columns.iter().map(|column| {
        let cell = Cell::new(column.header);
        if ctx.color {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }));

    for row in rows {
        table.add_row(row.iter().zip(columns).map(|(value, column)| {
            match column.color.filter(|_| ctx.color) {
                Some(pick) => Cell::new(value).fg(pick(value)),
                None => Cell::new(value),
            }
        }));
    }
    table
}

/// Print to stdout; JSON mode prints its own document instead.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Spacer between sections, pretty mode only.
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Error text for stderr. Plain mode drops the `Hint: ` label.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    if ctx.mode.is_pretty() {
        let mut text = badge(ctx, Badge::Err, message);
        if let Some(h) = error_hint {
            text.push('\n');
            text.push_str(&styled(h, styles::dim(), ctx.color));
        }
        return text;
    }

    let mut text = format!("error={}", message);
    if let Some(h) = error_hint {
        text.push_str("\nhint=");
        text.push_str(h.strip_prefix("Hint: ").unwrap_or(h));
    }
    text
}

pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
