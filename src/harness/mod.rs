//! Startup/shutdown lifecycle coordinator.
//!
//! # State Machine
//! ```text
//! Stopped → start() → Starting → Running
//!                        │
//!                        └─ failure/timeout → Stopped (error surfaced,
//!                           instance handle cleared, safe to retry)
//!
//! Running → stop() → Stopped (handle cleared even if stop errors)
//! ```
//!
//! # Design Decisions
//! - At most one instance per harness; a second start() is a usage
//!   error raised before any side effect
//! - stop() is idempotent and swallows teardown errors (logged only)
//! - reset_data() errors propagate; a stale store must fail loudly

use std::sync::Arc;
use std::time::Duration;

use crate::bootstrap::{Bootstrapper, HealthCheckRule};
use crate::config::{loader, HarnessConfig};
use crate::error::HarnessError;
use crate::modules::{default_module_set, ServerModule};
use crate::readiness::readiness_gate;
use crate::server::{LifecycleEvent, LifecycleObserver, ListenerHandle, WebListener};
use crate::storage::{impermanent_backend_factory, BackendFactory, DataCleaner, InMemoryBackend};

/// Bound on the stop-path join of the serve task.
const STOP_TIMEOUT: Duration = Duration::from_secs(10);

/// One running embedded service.
struct Instance {
    backend: Arc<InMemoryBackend>,
    handle: ListenerHandle,
    base_address: String,
}

/// Coordinates the lifecycle of one embedded server instance.
///
/// Instance-scoped state with a single owner: multiple independent
/// harnesses can coexist in one test process (on distinct ports).
pub struct ServerHarness {
    config: HarnessConfig,
    factory: BackendFactory,
    health_rules: Arc<Vec<Box<dyn HealthCheckRule>>>,
    modules: Arc<Vec<Box<dyn ServerModule>>>,
    instance: Option<Instance>,
}

impl Default for ServerHarness {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

impl ServerHarness {
    /// Build a harness with the disposable backend factory, an empty
    /// health-check set, and the default module set.
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            factory: impermanent_backend_factory(),
            health_rules: Arc::new(Vec::new()),
            modules: Arc::new(default_module_set()),
            instance: None,
        }
    }

    /// Substitute the backend construction path.
    pub fn with_backend_factory(mut self, factory: BackendFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Substitute the pre-start health check rules.
    pub fn with_health_rules(mut self, rules: Vec<Box<dyn HealthCheckRule>>) -> Self {
        self.health_rules = Arc::new(rules);
        self
    }

    /// Swap the whole module set.
    pub fn with_modules(mut self, modules: Vec<Box<dyn ServerModule>>) -> Self {
        self.modules = Arc::new(modules);
        self
    }

    /// Start the instance and block until it is verifiably ready.
    ///
    /// Resolves the properties resource, runs the bootstrapper, spawns
    /// the listener with a fresh readiness gate, and waits on the gate
    /// up to the configured bound. On any failure the harness is left
    /// stopped with no instance handle, safe to retry.
    pub async fn start(&mut self) -> Result<(), HarnessError> {
        if self.instance.is_some() {
            return Err(HarnessError::AlreadyRunning);
        }

        let resource = self.config.properties_resource.clone();
        let path = loader::resolve_resource(&resource).ok_or_else(|| {
            HarnessError::ConfigurationMissing {
                resource: resource.clone(),
            }
        })?;
        let properties = loader::load_properties(&path)
            .map_err(|source| HarnessError::ConfigurationInvalid { resource, source })?;

        let bootstrapper = Bootstrapper::new(
            self.factory.clone(),
            self.health_rules.clone(),
            self.modules.clone(),
        );
        let boot = bootstrapper
            .bootstrap(&properties, &self.config.hostname, self.config.port)
            .map_err(HarnessError::StartupFailed)?;

        let (signal, gate) = readiness_gate();
        let observer: LifecycleObserver = Arc::new(move |event| match event {
            LifecycleEvent::Started => signal.started(),
            LifecycleEvent::Failure(cause) => signal.failed(cause),
            LifecycleEvent::Starting | LifecycleEvent::Stopping | LifecycleEvent::Stopped => {}
        });

        let listener = WebListener::new(&self.config.hostname, self.config.port, boot.router)
            .with_observer(observer);
        let handle = listener.start();

        if let Err(error) = gate.wait(self.config.startup_timeout).await {
            handle.abort();
            return Err(error);
        }

        tracing::info!(address = %boot.base_address, "harness instance running");
        self.instance = Some(Instance {
            backend: boot.backend,
            handle,
            base_address: boot.base_address,
        });
        Ok(())
    }

    /// Stop the instance. Idempotent; teardown errors are logged and
    /// swallowed, and the instance handle is cleared unconditionally.
    pub async fn stop(&mut self) {
        let Some(instance) = self.instance.take() else {
            tracing::debug!("stop() called with no running instance");
            return;
        };
        if let Err(error) = instance.handle.stop(STOP_TIMEOUT).await {
            tracing::warn!(error = %error, "error stopping embedded server");
        }
    }

    /// Clear all entities from the running instance's backend.
    ///
    /// Returns how many entities were removed. Requires a running
    /// instance; reset errors propagate so the invoking test fails
    /// loudly instead of proceeding against stale data.
    pub fn reset_data(&self) -> Result<usize, HarnessError> {
        let instance = self.instance.as_ref().ok_or(HarnessError::NotRunning)?;
        DataCleaner::new(instance.backend.clone())
            .clean()
            .map_err(HarnessError::ResetFailed)
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// Configured hostname.
    pub fn hostname(&self) -> &str {
        &self.config.hostname
    }

    /// Root address of the running instance; `None` while stopped.
    pub fn base_address(&self) -> Option<&str> {
        self.instance.as_ref().map(|i| i.base_address.as_str())
    }

    /// Handle to the running instance's backend; `None` while stopped.
    pub fn backend(&self) -> Option<Arc<InMemoryBackend>> {
        self.instance.as_ref().map(|i| i.backend.clone())
    }

    /// Whether an instance is currently held.
    pub fn is_running(&self) -> bool {
        self.instance.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_reflect_stopped_state() {
        let harness = ServerHarness::default();
        assert_eq!(harness.port(), 7473);
        assert_eq!(harness.hostname(), "localhost");
        assert!(harness.base_address().is_none());
        assert!(harness.backend().is_none());
        assert!(!harness.is_running());
    }

    #[test]
    fn reset_while_stopped_is_a_usage_error() {
        let harness = ServerHarness::default();
        assert!(matches!(
            harness.reset_data(),
            Err(HarnessError::NotRunning)
        ));
    }
}
