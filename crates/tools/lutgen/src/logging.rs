use crate::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// Events go to stderr; stdout carries the reports. An unparsable
/// `filter` falls back to [`DEFAULT_LOG_FILTER`]. Calling this twice is a
/// no-op.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("Warning: ignoring invalid log filter {filter:?}: {err}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
