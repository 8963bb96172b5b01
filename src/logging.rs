//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; operator-facing output goes
//! through `ui::messages`. The level defaults to WARN and is raised by `-v`
//! flags or set with the `GOLTIME_LOG` env var (RUST_LOG syntax).

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "GOLTIME_LOG";

pub fn level_for(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::INFO),
        2 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let filter = match level_for(verbosity) {
        Some(level) => filter.add_directive(level.into()),
        None => filter,
    };

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
