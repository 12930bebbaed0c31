//! Instance bootstrapping.
//!
//! # Data Flow
//! ```text
//! ServerProperties
//!     → health check rules (all must pass, fail fast pre-start)
//!     → BackendFactory (override yields a fresh in-memory backend)
//!     → module routers nested under their mount paths
//!     → root discovery route + TraceLayer
//!     → BootContext { backend handle, assembled router }
//! ```
//!
//! # Design Decisions
//! - Overrides are values passed into the constructor, not subclass
//!   hooks: a fixture swaps the factory, the rule list, or the module
//!   list wholesale
//! - Health checks run before any backend or network construction

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::config::ServerProperties;
use crate::error::StartupError;
use crate::modules::ServerModule;
use crate::storage::{BackendFactory, InMemoryBackend};

/// A pre-start health check over the resolved properties.
pub trait HealthCheckRule: Send + Sync {
    /// Rule name, reported in the startup error on failure.
    fn name(&self) -> &'static str;

    /// Check the rule; an `Err` reason fails startup.
    fn check(&self, properties: &ServerProperties) -> Result<(), String>;
}

/// Default rule of a persistent deployment: the configured store path
/// must be usable. The harness passes an empty rule list instead, since
/// the disposable backend has nothing external to probe.
pub struct StorePathAvailable;

impl HealthCheckRule for StorePathAvailable {
    fn name(&self) -> &'static str {
        "store-path-available"
    }

    fn check(&self, properties: &ServerProperties) -> Result<(), String> {
        if properties.store.path.trim().is_empty() {
            return Err("store path is empty".to_string());
        }
        Ok(())
    }
}

/// Everything `start()` needs from a successful bootstrap.
pub struct BootContext {
    /// Handle to the freshly constructed backend.
    pub backend: Arc<InMemoryBackend>,
    /// Router with all module surfaces mounted.
    pub router: Router,
    /// Root address the instance will serve once the listener is up.
    pub base_address: String,
}

/// Builds the backend and router for one instance from the configured
/// overrides.
pub struct Bootstrapper {
    factory: BackendFactory,
    health_rules: Arc<Vec<Box<dyn HealthCheckRule>>>,
    modules: Arc<Vec<Box<dyn ServerModule>>>,
}

impl Bootstrapper {
    /// Assemble a bootstrapper from explicit overrides.
    pub fn new(
        factory: BackendFactory,
        health_rules: Arc<Vec<Box<dyn HealthCheckRule>>>,
        modules: Arc<Vec<Box<dyn ServerModule>>>,
    ) -> Self {
        Self {
            factory,
            health_rules,
            modules,
        }
    }

    /// Run health checks, construct the backend, and assemble the
    /// router for the given bind target. No network resource is touched
    /// here.
    pub fn bootstrap(
        &self,
        properties: &ServerProperties,
        hostname: &str,
        port: u16,
    ) -> Result<BootContext, StartupError> {
        for rule in self.health_rules.iter() {
            rule.check(properties)
                .map_err(|reason| StartupError::HealthCheck {
                    rule: rule.name(),
                    reason,
                })?;
        }

        let backend = (self.factory)(&properties.store);

        let mut router = Router::new().route("/", get(discovery(&self.modules)));
        for module in self.modules.iter() {
            tracing::debug!(module = module.name(), path = module.mount_path(), "mounting module");
            router = router.nest(module.mount_path(), module.router(backend.clone()));
        }
        let router = router.layer(TraceLayer::new_for_http());

        Ok(BootContext {
            backend,
            router,
            base_address: format!("http://{hostname}:{port}/"),
        })
    }
}

/// Root discovery handler: lists the mounted module surfaces.
fn discovery(
    modules: &[Box<dyn ServerModule>],
) -> impl Fn() -> std::future::Ready<Json<Value>> + Clone + Send + Sync + 'static {
    let index: Value = modules
        .iter()
        .map(|m| (m.name().to_string(), Value::from(m.mount_path())))
        .collect::<serde_json::Map<_, _>>()
        .into();
    move || std::future::ready(Json(index.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::default_module_set;
    use crate::storage::impermanent_backend_factory;

    fn bootstrapper(rules: Vec<Box<dyn HealthCheckRule>>) -> Bootstrapper {
        Bootstrapper::new(
            impermanent_backend_factory(),
            Arc::new(rules),
            Arc::new(default_module_set()),
        )
    }

    #[test]
    fn bootstrap_yields_an_empty_backend_and_the_base_address() {
        let ctx = bootstrapper(Vec::new())
            .bootstrap(&ServerProperties::default(), "localhost", 7473)
            .expect("bootstrap must succeed with no rules");
        assert_eq!(ctx.backend.count(), 0);
        assert_eq!(ctx.base_address, "http://localhost:7473/");
    }

    #[test]
    fn failing_rule_aborts_before_backend_construction() {
        struct AlwaysFails;
        impl HealthCheckRule for AlwaysFails {
            fn name(&self) -> &'static str {
                "always-fails"
            }
            fn check(&self, _: &ServerProperties) -> Result<(), String> {
                Err("nope".to_string())
            }
        }

        let result = bootstrapper(vec![Box::new(AlwaysFails)])
            .bootstrap(&ServerProperties::default(), "localhost", 7473);
        assert!(matches!(
            result,
            Err(StartupError::HealthCheck { rule: "always-fails", .. })
        ));
    }

    #[test]
    fn store_path_rule_rejects_empty_path() {
        let mut properties = ServerProperties::default();
        properties.store.path = "  ".to_string();
        assert!(StorePathAvailable.check(&properties).is_err());
        assert!(StorePathAvailable.check(&ServerProperties::default()).is_ok());
    }
}
