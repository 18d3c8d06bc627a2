//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`. `GLYPH_LOG` takes an
//! `EnvFilter` directive string; without it the level follows the number of
//! `-v` flags.

use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives
pub const LOG_ENV: &str = "GLYPH_LOG";

/// Level directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter from `GLYPH_LOG`, falling back to the verbosity level.
pub fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
