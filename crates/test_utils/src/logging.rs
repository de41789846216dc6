//! Tracing setup for tests

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static INIT: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .ok();
});

/// Initialises the tracing subscriber once per test binary
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_test_logging() {
    Lazy::force(&INIT);
}
