//! Logging setup.
//!
//! Log events go to stderr so stdout carries only rendered command output.

use tracing_subscriber::EnvFilter;

/// Filter used with `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "zbctl_rs=debug";

/// Filter used otherwise when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Builds the event filter.
///
/// `RUST_LOG` takes precedence over the `--verbose` flag.
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    })
}

/// Installs the global subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
