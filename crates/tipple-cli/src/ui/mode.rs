//! Output mode selection.

/// How a command renders its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// A single JSON document on stdout
    Json,
    /// `key=value` lines and tab-separated rows for scripts
    #[default]
    Plain,
    /// Colors, badges, bordered tables and the weekly bar
    Pretty,
}

impl OutputMode {
    /// Pick the mode for one command.
    ///
    /// `--json` wins over `--format`; `--format plain` wins over the
    /// terminal. Pretty output needs a terminal that can render it.
    pub fn resolve(json: bool, format: Option<&str>, rich_terminal: bool) -> Self {
        match (json, format) {
            (true, _) => Self::Json,
            (false, Some("plain")) => Self::Plain,
            _ if rich_terminal => Self::Pretty,
            _ => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        *self == Self::Json
    }

    pub fn is_pretty(&self) -> bool {
        *self == Self::Pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_beats_format() {
        assert_eq!(OutputMode::resolve(true, Some("plain"), true), OutputMode::Json);
        assert_eq!(OutputMode::resolve(true, None, false), OutputMode::Json);
    }

    #[test]
    fn test_format_plain_on_a_terminal() {
        assert_eq!(OutputMode::resolve(false, Some("plain"), true), OutputMode::Plain);
    }

    #[test]
    fn test_table_format_follows_terminal() {
        assert_eq!(OutputMode::resolve(false, Some("table"), true), OutputMode::Pretty);
        assert_eq!(OutputMode::resolve(false, Some("table"), false), OutputMode::Plain);
    }
}
