use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use crate::constants::LOG_ENV;

/// Default filter directive for a given `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize structured logging for the application.
///
/// `-v` sets the level directly; without it `TIPPLE_LOG` is read, falling
/// back to `warn`. Logs go to stderr.
pub fn init_logging(verbose: u8) {
    let filter = if verbose == 0 {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(0)))
    } else {
        EnvFilter::new(default_directive(verbose))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    debug!("logging initialized");
}
