//! Logging setup.
//!
//! Output goes to stderr as bare messages; the configured [`OutputLevel`]
//! is the default filter and `RUST_LOG` overrides it.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::OutputLevel;

/// Build the filter for an output level, honoring `RUST_LOG` when set.
pub fn filter_for(level: OutputLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(level: OutputLevel) {
    let layer = fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter_for(level))
        .with(layer)
        .try_init();
}
