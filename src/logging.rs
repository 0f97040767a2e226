//! Diagnostic logging
//!
//! Logs go to stderr so they never mix with command output. `STEVEDORE_LOG`
//! takes an `EnvFilter` directive and overrides `--verbose`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "STEVEDORE_LOG";

/// Filter used when `STEVEDORE_LOG` is unset or invalid
pub fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("warn,stevedore=debug")
    } else {
        EnvFilter::new("warn")
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(verbose));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
