//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with `RUST_LOG`, falling back to `default_directive`.
///
/// Logs are JSON lines on stderr so stdout stays free for program output.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    ::tracing::debug!(default_directive, "tracing initialized");
}
