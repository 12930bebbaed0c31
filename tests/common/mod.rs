//! Shared fixtures for harness integration tests.

use embedded_harness::{HarnessConfig, ServerHarness};

/// Build a harness bound to 127.0.0.1 on the given port, with logging
/// initialized for the test process.
pub fn harness_on(port: u16) -> ServerHarness {
    embedded_harness::observability::init_test_logging();
    ServerHarness::new(HarnessConfig::new("127.0.0.1", port))
}

/// A client that will not route through any local proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client must build")
}
