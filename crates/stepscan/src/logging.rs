//! Structured logging with environment variable configuration.
//!
//! Logs are written to stderr so that command output on stdout stays
//! machine-readable.

use tracing_subscriber::EnvFilter;

use crate::config::RuntimeConfig;

fn filter_from_config(config: &RuntimeConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level` (parsed into `config.log_level`)
/// 2. `STEPSCAN_LOG_LEVEL` (parsed into `config.log_level`)
/// 3. Default configuration value
///
/// If a global subscriber is already set the error is ignored and the first
/// subscriber stays in place.
pub fn init_logging(config: &RuntimeConfig) {
    let filter = filter_from_config(config);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
