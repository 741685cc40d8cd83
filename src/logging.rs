//! Tracing/logging initialization.
//!
//! Diagnostics go to stderr so report text on stdout stays clean.
//! `RUST_LOG` wins over the verbosity flag when it is set.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for the process.
///
/// `interactive` silences the default output while the TUI owns the
/// terminal. Colors are only used when stderr is a terminal. Safe to call multiple times (subsequent calls are no-ops).
pub fn init(verbosity: u8, interactive: bool) {
    let default = if interactive { "off" } else { level_for(verbosity) };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
