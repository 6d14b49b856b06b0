//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

/// Symbol pair for ASCII and Unicode variants.
#[derive(Debug, Clone)]
pub struct SymbolPair {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl SymbolPair {
    pub const fn new(ascii: &'static str, unicode: &'static str) -> Self {
        Self { ascii, unicode }
    }

    /// Get the appropriate symbol based on unicode flag.
    pub fn get(&self, unicode: bool) -> &'static str {
        if unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Marker for a consumed entry.
pub const CONSUMED: SymbolPair = SymbolPair::new("yes", "\u{2705}"); // ✅

/// Marker for a pending entry.
pub const PENDING: SymbolPair = SymbolPair::new("no", "\u{274C}"); // ❌

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
            Self::Info => "[INFO]",
        }
    }

    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Ok => "[\u{2713}]",   // [✓]
            Self::Warn => "[\u{26A0}]", // [⚠]
            Self::Err => "[\u{2717}]",  // [✗]
            Self::Info => "[\u{2139}]", // [ℹ]
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::success(),
            Self::Warn => styles::warning(),
            Self::Err => styles::error(),
            Self::Info => styles::info(),
        }
    }
}

/// Named styles.
pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn success() -> Style {
        Style::new().green().bold()
    }

    pub fn warning() -> Style {
        Style::new().yellow().bold()
    }

    pub fn error() -> Style {
        Style::new().red().bold()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }
}

/// Table cell color for a drink category; unknown categories are white.
pub fn category_color(category: &str) -> comfy_table::Color {
    use comfy_table::Color;

    match tipple_core::units::canonical_category(category) {
        Some("Beer") => Color::Yellow,
        Some("Wine") => Color::Red,
        Some("Whiskey") => Color::Magenta,
        Some("Vodka") => Color::Cyan,
        _ => Color::White,
    }
}

/// Apply `style` to `text` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(Badge::Ok.text(), "[OK]");
        assert_eq!(Badge::Warn.text(), "[WARN]");
        assert_eq!(Badge::Err.text(), "[ERR]");
        assert_eq!(Badge::Info.text(), "[INFO]");
    }

    #[test]
    fn test_badge_display() {
        assert_eq!(Badge::Ok.display(false), "[OK]");
        assert_eq!(Badge::Ok.display(true), "[\u{2713}]");
    }

    #[test]
    fn test_styled_without_color_is_verbatim() {
        assert_eq!(styled("IPA", styles::bold(), false), "IPA");
    }

    #[test]
    fn test_styled_with_color_adds_escapes() {
        let out = styled("IPA", styles::warning(), true);
        assert!(out.contains("IPA"));
        assert!(out.contains('\x1b'));
    }

    #[test]
    fn test_category_color() {
        assert_eq!(category_color("wine"), comfy_table::Color::Red);
        assert_eq!(category_color("Cider"), comfy_table::Color::White);
    }

    #[test]
    fn test_status_symbols() {
        assert_eq!(CONSUMED.get(false), "yes");
        assert_eq!(PENDING.get(true), "\u{274C}");
    }
}
