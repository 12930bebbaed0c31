//! Non-persistent entity store backing one instance.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored entity: an id plus free-form JSON properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Entity identifier, assigned on creation.
    pub id: Uuid,
    /// Free-form properties supplied by the client.
    pub properties: Map<String, Value>,
}

/// A thread-safe, in-memory entity store.
///
/// Holds nothing on disk; dropping the backend drops all data. Handlers
/// and the harness share it via `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entities: DashMap<Uuid, Entity>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new entity with the given properties, returning it.
    pub fn create(&self, properties: Map<String, Value>) -> Entity {
        let entity = Entity {
            id: Uuid::new_v4(),
            properties,
        };
        self.entities.insert(entity.id, entity.clone());
        entity
    }

    /// Look up an entity by id.
    pub fn get(&self, id: Uuid) -> Option<Entity> {
        self.entities.get(&id).map(|e| e.value().clone())
    }

    /// Remove an entity by id. Returns whether it existed.
    pub fn delete(&self, id: Uuid) -> bool {
        self.entities.remove(&id).is_some()
    }

    /// Number of entities currently stored.
    pub fn count(&self) -> usize {
        self.entities.len()
    }

    /// Remove all entities, returning how many were removed. The
    /// backend stays usable afterwards.
    pub fn clear(&self) -> usize {
        let removed = self.entities.len();
        self.entities.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(key: &str, value: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::String(value.to_string()));
        map
    }

    #[test]
    fn create_then_get_round_trips() {
        let backend = InMemoryBackend::new();
        let created = backend.create(props("name", "fixture"));
        let fetched = backend.get(created.id).expect("entity must exist");
        assert_eq!(fetched.properties["name"], "fixture");
    }

    #[test]
    fn delete_reports_existence() {
        let backend = InMemoryBackend::new();
        let created = backend.create(Map::new());
        assert!(backend.delete(created.id));
        assert!(!backend.delete(created.id));
        assert!(backend.get(created.id).is_none());
    }

    #[test]
    fn clear_empties_but_keeps_backend_usable() {
        let backend = InMemoryBackend::new();
        for _ in 0..5 {
            backend.create(Map::new());
        }
        assert_eq!(backend.clear(), 5);
        assert_eq!(backend.count(), 0);

        backend.create(Map::new());
        assert_eq!(backend.count(), 1);
    }
}
