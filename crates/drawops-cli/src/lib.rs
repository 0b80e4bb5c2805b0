//! drawops CLI
//!
//! Library half of the `drawops` binary. Each subcommand is a plain function
//! from inputs to the text it prints, so it can be tested without spawning
//! a process.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DRAWOPS_LOG";

/// Filter used when [`LOG_ENV`] is unset or unparsable
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global subscriber, writing to stderr
///
/// Stdout is reserved for command output.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // a second install (tests, embedding) keeps the first subscriber
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
