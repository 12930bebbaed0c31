//! Configuration schema definitions.
//!
//! `HarnessConfig` is the per-fixture builder; `ServerProperties` is
//! what the named properties resource deserializes into.

use serde::Deserialize;
use std::time::Duration;

/// Default readiness bound: generous enough for slow CI machines.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-fixture harness configuration.
///
/// Immutable once an instance is started from it; rebuild fluently
/// before the next start.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Hostname the listener binds to.
    pub hostname: String,

    /// Port the listener binds to.
    pub port: u16,

    /// Name of the properties resource, resolved from the lookup root.
    pub properties_resource: String,

    /// Bound on the readiness wait in `start()`.
    pub startup_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: 7473,
            properties_resource: "test-server.toml".to_string(),
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
        }
    }
}

impl HarnessConfig {
    /// Create a config for the given host and port with defaults elsewhere.
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
            ..Self::default()
        }
    }

    /// Use a different properties resource name.
    pub fn with_properties_resource(mut self, resource: impl Into<String>) -> Self {
        self.properties_resource = resource.into();
        self
    }

    /// Use a different readiness bound.
    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }
}

/// Properties deserialized from the resolved resource.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerProperties {
    /// Store settings the bootstrapper would honor for a persistent
    /// backend. The harness factory override ignores the path.
    pub store: StoreSettings,
}

/// Storage backend settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory a persistent backend would write to. Ignored by the
    /// in-memory override.
    pub path: String,

    /// Soft cap on entities a fixture is expected to hold.
    pub expected_capacity: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: "data/test-store".to_string(),
            expected_capacity: 10_000,
        }
    }
}
