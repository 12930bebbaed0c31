//! Observability for harness-driven tests.
//!
//! The harness itself only emits `tracing` events; initializing a
//! subscriber is left to the embedding test suite so it composes with
//! whatever layers that suite already installs.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a test-friendly subscriber honoring `RUST_LOG`.
///
/// Safe to call from every test; later calls are no-ops once a global
/// subscriber is set.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
