//! Logging setup for the tasl binary.
//!
//! Engine crates log through the `log` facade and report progress through a
//! [`Reporter`](tasl_core::Reporter); the binary installs one
//! `tracing-subscriber` formatter that receives both.

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Pick the filter directive: `--log-level`, then `RUST_LOG`, then the
/// configured level.
pub fn filter_directive(cli_level: Option<LogLevel>, rust_log: Option<&str>, configured: &str) -> String {
    match (cli_level, rust_log) {
        (Some(level), _) => level.as_directive().to_string(),
        (None, Some(env)) if !env.trim().is_empty() => env.to_string(),
        _ => configured.to_string(),
    }
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init(cli_level: Option<LogLevel>, configured: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(cli_level, rust_log.as_deref(), configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log level '{directive}': {e}");
        EnvFilter::new("info")
    });

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
