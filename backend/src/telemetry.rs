//! Tracing subscriber initialisation.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber, filtered by `RUST_LOG`.
///
/// A second initialisation (or any other failure) is reported as a warning
/// and otherwise ignored.
pub fn init(json_logs: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = if json_logs {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
