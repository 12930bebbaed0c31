//! Disposable storage subsystem.
//!
//! # Data Flow
//! ```text
//! BackendFactory (override, ignores the configured store path)
//!     → fresh InMemoryBackend per start
//!     → shared via Arc with module handlers and the harness
//!
//! DataCleaner
//!     → clears all entities, backend stays usable
//! ```

pub mod cleaner;
pub mod memory;

pub use cleaner::DataCleaner;
pub use memory::{Entity, InMemoryBackend};

use std::sync::Arc;

use crate::config::StoreSettings;

/// Factory producing the storage backend for one instance.
///
/// Passed by value into the bootstrapper so a fixture can substitute its
/// own construction path.
pub type BackendFactory = Arc<dyn Fn(&StoreSettings) -> Arc<InMemoryBackend> + Send + Sync>;

/// The harness default: ignore any requested store path and return a
/// fresh, non-persistent backend on every invocation. Safe to call
/// repeatedly across restarts.
pub fn impermanent_backend_factory() -> BackendFactory {
    Arc::new(|_settings| Arc::new(InMemoryBackend::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_yields_a_fresh_backend_per_invocation() {
        let settings = StoreSettings::default();
        let factory = impermanent_backend_factory();

        let first = factory(&settings);
        first.create(serde_json::Map::new());
        let second = factory(&settings);

        assert_eq!(first.count(), 1);
        assert_eq!(second.count(), 0, "second backend must start empty");
    }
}
