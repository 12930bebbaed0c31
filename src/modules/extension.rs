//! Extensibility surface: discovery of registered extensions plus a
//! liveness ping used by client smoke tests.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::modules::ServerModule;
use crate::storage::InMemoryBackend;

/// The extensibility module, mounted at `/ext`.
pub struct ExtensionModule {
    extensions: Vec<&'static str>,
}

impl Default for ExtensionModule {
    fn default() -> Self {
        Self {
            extensions: vec!["ping"],
        }
    }
}

impl ExtensionModule {
    /// Build a module advertising the given extension names.
    pub fn with_extensions(extensions: Vec<&'static str>) -> Self {
        Self { extensions }
    }
}

#[derive(Serialize, Clone)]
struct ExtensionIndex {
    extensions: Vec<&'static str>,
}

impl ServerModule for ExtensionModule {
    fn name(&self) -> &'static str {
        "extensions"
    }

    fn mount_path(&self) -> &'static str {
        "/ext"
    }

    fn router(&self, _backend: Arc<InMemoryBackend>) -> Router {
        let index = ExtensionIndex {
            extensions: self.extensions.clone(),
        };
        Router::new()
            .route("/", get(list_extensions))
            .route("/ping", get(ping))
            .with_state(index)
    }
}

async fn list_extensions(State(index): State<ExtensionIndex>) -> Json<ExtensionIndex> {
    Json(index)
}

async fn ping() -> &'static str {
    "pong"
}
