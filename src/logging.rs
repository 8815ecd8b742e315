// Diagnostic logging. Everything goes to stderr so stdout carries only the
// chat transcript; the filter comes from RUST_LOG and defaults to warnings.
// Request failures are already printed on stdout and only log at debug.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "warn";

/// Filter from a `RUST_LOG`-style spec; blank or absent means
/// [`DEFAULT_FILTER`].
pub fn build_filter(spec: Option<&str>) -> Result<EnvFilter> {
    match spec.map(str::trim) {
        Some(spec) if !spec.is_empty() => {
            EnvFilter::try_new(spec).map_err(|e| anyhow!("Invalid RUST_LOG filter: {}", e))
        }
        _ => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install the global subscriber. Fails if `RUST_LOG` is not a valid filter
/// or a subscriber is already set.
pub fn init_logging() -> Result<()> {
    let spec = std::env::var("RUST_LOG").ok();
    let filter = build_filter(spec.as_deref())?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| anyhow!("Failed to init logging: {}", e))?;
    Ok(())
}
