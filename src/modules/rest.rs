//! Primary REST API surface: JSON entity CRUD over the backend.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::modules::ServerModule;
use crate::storage::InMemoryBackend;

/// The primary API module, mounted at `/db/data`.
pub struct RestApiModule;

impl ServerModule for RestApiModule {
    fn name(&self) -> &'static str {
        "rest-api"
    }

    fn mount_path(&self) -> &'static str {
        "/db/data"
    }

    fn router(&self, backend: Arc<InMemoryBackend>) -> Router {
        Router::new()
            .route("/", get(data_root))
            .route("/entity", post(create_entity))
            .route("/entity/{id}", get(get_entity).delete(delete_entity))
            .with_state(backend)
    }
}

/// Data-root summary, mirrors what clients probe to discover the store.
async fn data_root(State(backend): State<Arc<InMemoryBackend>>) -> Json<Value> {
    Json(serde_json::json!({
        "entity": "entity",
        "entity_count": backend.count(),
    }))
}

async fn create_entity(
    State(backend): State<Arc<InMemoryBackend>>,
    Json(properties): Json<Map<String, Value>>,
) -> Response {
    let entity = backend.create(properties);
    tracing::debug!(id = %entity.id, "entity created");
    (StatusCode::CREATED, Json(entity)).into_response()
}

async fn get_entity(
    State(backend): State<Arc<InMemoryBackend>>,
    Path(id): Path<Uuid>,
) -> Response {
    match backend.get(id) {
        Some(entity) => Json(entity).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_entity(
    State(backend): State<Arc<InMemoryBackend>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if backend.delete(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
