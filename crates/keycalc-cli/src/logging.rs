//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only display lines and JSON.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Verbosity;

/// Builds the log filter: `RUST_LOG` wins, otherwise the `-v` level
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(verbosity.filter_directive()))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber
///
/// Calling it twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_tracing(verbosity: Verbosity) {
    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(env_filter(verbosity))
        .try_init();

    if installed.is_ok() {
        tracing::debug!(filter = verbosity.filter_directive(), "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_builds_for_every_level() {
        for verbosity in [
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Debug,
            Verbosity::Trace,
        ] {
            let filter = env_filter(verbosity);
            assert!(!filter.to_string().is_empty());
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(Verbosity::Normal);
        init_tracing(Verbosity::Debug);
    }
}
