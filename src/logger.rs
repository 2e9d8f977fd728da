//! Logging setup.

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

const FALLBACK_LEVEL: &str = "info";

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` from the configuration is
/// used as the filter.
pub fn init_logger(level: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(level));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()
}

/// Filter built from a configured level, `info` when it does not parse
fn config_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}
