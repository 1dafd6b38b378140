//! Tracing subscriber setup for binaries and tests that embed fskit

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Install a compact stdout subscriber filtered by `RUST_LOG`, or "info".
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<(), InitError> {
    init_with("info")
}

/// Like [`init`], with `fallback` as the filter directive when `RUST_LOG`
/// is unset, e.g. `"fskit=debug"` to see every operation boundary.
pub fn init_with(fallback: &str) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    let layer = fmt::layer().with_target(true).compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;
    tracing::debug!(fallback, "fskit logging initialized");
    Ok(())
}
