//! Functional modules the instance exposes.
//!
//! A module is an opaque capability surface identified by name,
//! contributing an axum `Router` mounted at its prefix. The set is
//! fixed and ordered; a fixture swaps the whole list, never individual
//! entries.

pub mod extension;
pub mod rest;

pub use extension::ExtensionModule;
pub use rest::RestApiModule;

use std::sync::Arc;

use axum::Router;

use crate::storage::InMemoryBackend;

/// A named capability surface mounted into the instance's router.
pub trait ServerModule: Send + Sync {
    /// Module name, used for logging and discovery.
    fn name(&self) -> &'static str;

    /// Path prefix the module's router is nested under.
    fn mount_path(&self) -> &'static str;

    /// Build the module's router over the given backend.
    fn router(&self, backend: Arc<InMemoryBackend>) -> Router;
}

/// The default module set: primary REST API surface plus the
/// extensibility surface, in that order.
pub fn default_module_set() -> Vec<Box<dyn ServerModule>> {
    vec![
        Box::new(RestApiModule),
        Box::new(ExtensionModule::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_rest_then_extensions() {
        let modules = default_module_set();
        let names: Vec<_> = modules.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["rest-api", "extensions"]);
    }

    #[test]
    fn mount_paths_are_disjoint() {
        let modules = default_module_set();
        let paths: Vec<_> = modules.iter().map(|m| m.mount_path()).collect();
        assert_eq!(paths, ["/db/data", "/ext"]);
    }
}
