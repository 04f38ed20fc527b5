//! Tracing setup for host binaries and tests.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global tracing subscriber: `RUST_LOG`-style env filtering with a
/// plain fmt layer, defaulting to `info`. Safe to call more than once; later
/// calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
