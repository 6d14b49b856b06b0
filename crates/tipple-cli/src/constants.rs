//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, database, profile).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;
}

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "TIPPLE_CONFIG";

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "TIPPLE_LOG";

/// Width of the weekly progress bar in cells.
pub const PROGRESS_BAR_WIDTH: u16 = 30;
