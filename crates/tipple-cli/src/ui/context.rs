//! Terminal probing and the per-command UI context.

use std::io::IsTerminal;

use super::mode::OutputMode;

const FALLBACK_WIDTH: usize = 80;

/// What the process environment says about the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub dumb: bool,
    pub no_color: bool,
    pub width: Option<usize>,
}

impl Terminal {
    /// Inspect stdout, `TERM`, `NO_COLOR` and `COLUMNS`.
    pub fn probe() -> Self {
        let columns = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|w| *w > 0);

        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|v| v == "dumb"),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            width: columns.or_else(stdout_columns),
        }
    }

    /// A terminal that can show colors, redraws and box tables.
    pub fn is_rich(&self) -> bool {
        self.stdout_tty && !self.dumb
    }
}

/// Resolved rendering choices shared by every printer.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    /// Columns available for tables
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Probe the terminal and combine it with the command's flags.
    ///
    /// `no_color` and `ascii` already include the config file's `[ui]`
    /// settings.
    pub fn from_env(json: bool, format: Option<&str>, no_color: bool, ascii: bool) -> Self {
        Self::for_terminal(&Terminal::probe(), json, format, no_color, ascii)
    }

    pub fn for_terminal(
        term: &Terminal,
        json: bool,
        format: Option<&str>,
        no_color: bool,
        ascii: bool,
    ) -> Self {
        Self {
            is_tty: term.stdout_tty,
            color: term.is_rich() && !term.no_color && !no_color,
            unicode: !ascii,
            width: term.width.unwrap_or(FALLBACK_WIDTH),
            mode: OutputMode::resolve(json, format, term.is_rich()),
        }
    }

    /// Prompts need a terminal on both ends.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && std::io::stdin().is_terminal()
    }

    /// Whether the weekly bar may be drawn.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty()
    }
}

#[cfg(unix)]
fn stdout_columns() -> Option<usize> {
    use std::mem::MaybeUninit;

    let mut size = MaybeUninit::<libc::winsize>::uninit();
    // SAFETY: TIOCGWINSZ only writes into the provided winsize
    let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, size.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }
    // SAFETY: ioctl succeeded, so the struct is initialized
    let size = unsafe { size.assume_init() };
    (size.ws_col > 0).then_some(usize::from(size.ws_col))
}

#[cfg(not(unix))]
fn stdout_columns() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty() -> Terminal {
        Terminal {
            stdout_tty: true,
            dumb: false,
            no_color: false,
            width: Some(120),
        }
    }

    #[test]
    fn test_tty_is_pretty_and_colored() {
        let ctx = UiContext::for_terminal(&tty(), false, None, false, false);
        assert_eq!(ctx.mode, OutputMode::Pretty);
        assert!(ctx.color);
        assert_eq!(ctx.width, 120);
    }

    #[test]
    fn test_dumb_terminal_is_plain_without_color() {
        let term = Terminal { dumb: true, ..tty() };
        let ctx = UiContext::for_terminal(&term, false, None, false, false);
        assert_eq!(ctx.mode, OutputMode::Plain);
        assert!(!ctx.color);
    }

    #[test]
    fn test_no_color_env_and_flag() {
        let env = Terminal { no_color: true, ..tty() };
        assert!(!UiContext::for_terminal(&env, false, None, false, false).color);
        assert!(!UiContext::for_terminal(&tty(), false, None, true, false).color);
    }

    #[test]
    fn test_ascii_and_width_fallback() {
        let term = Terminal {
            stdout_tty: false,
            width: None,
            ..tty()
        };
        let ctx = UiContext::for_terminal(&term, true, None, false, true);
        assert_eq!(ctx.mode, OutputMode::Json);
        assert!(!ctx.unicode);
        assert_eq!(ctx.width, FALLBACK_WIDTH);
        assert!(!ctx.allows_animation());
    }
}
