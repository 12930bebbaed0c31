//! Data-reset collaborator.

use std::sync::Arc;

use crate::error::ResetError;
use crate::storage::InMemoryBackend;

/// Clears all entities from a backend between tests.
///
/// Errors propagate to the caller of `reset_data()`: a silently-failed
/// reset would corrupt the assumptions of every following test.
pub struct DataCleaner {
    backend: Arc<InMemoryBackend>,
}

impl DataCleaner {
    /// Bind a cleaner to the given backend handle.
    pub fn new(backend: Arc<InMemoryBackend>) -> Self {
        Self { backend }
    }

    /// Remove every entity, returning how many were removed.
    pub fn clean(&self) -> Result<usize, ResetError> {
        let removed = self.backend.clear();
        let remaining = self.backend.count();
        if remaining != 0 {
            return Err(ResetError(format!(
                "{remaining} entities still visible after reset"
            )));
        }
        tracing::debug!(removed, "backend data reset");
        Ok(removed)
    }
}
