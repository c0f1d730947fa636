//! Subscriber setup for the progress log.
//!
//! Progress lines are emitted with `tracing` macros throughout the crate;
//! this installs a `fmt` subscriber writing them to stderr. `RUST_LOG`
//! overrides the default `info` filter.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

use crate::error::RebalanceError;
use crate::github::event::running_in_actions;

const DEFAULT_FILTER: &str = "info";

fn build_filter() -> Result<EnvFilter, RebalanceError> {
    let directives = env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned());

    EnvFilter::try_new(&directives).map_err(|error| RebalanceError::Configuration {
        message: format!("invalid log filter '{directives}': {error}"),
    })
}

/// Installs the global subscriber.
///
/// The Actions log viewer renders its own timestamps and does not handle
/// colour codes consistently, so both are disabled on runners.
///
/// # Errors
///
/// Returns [`RebalanceError::Configuration`] when `RUST_LOG` cannot be parsed
/// or a global subscriber is already installed.
pub fn init_logging() -> Result<(), RebalanceError> {
    let filter = build_filter()?;
    let on_runner = running_in_actions();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(!on_runner);

    let result = if on_runner {
        builder.without_time().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|error| RebalanceError::Configuration {
        message: format!("failed to install log subscriber: {error}"),
    })
}
