//! Tracing subscriber configuration.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber: JSON lines, filtered via `RUST_LOG`
/// (falling back to `info`).
pub fn init() {
    init_with_default_filter("info");
}

/// Like [`init`], but with an explicit fallback filter for when `RUST_LOG`
/// is unset. Tests use this to raise verbosity for a single crate.
pub fn init_with_default_filter(directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
