pub mod rows;
pub mod snapshot;

pub use rows::*;
pub use snapshot::*;

pub use crate::error::StoreError;

use crate::graph::PlaybookDefinition;
use ahash::AHashMap;

/// Persistence boundary for playbook graphs.
///
/// The core hands the adapter its in-memory collections and receives them
/// back unchanged in shape; how and where they live is the host's concern.
/// Synchronous in, synchronous out.
pub trait GraphStore {
    /// Loads the playbook saved under `container_id`, or `None` when the
    /// container has never been saved.
    fn load_graph(&self, container_id: &str) -> Result<Option<PlaybookDefinition>, StoreError>;

    /// Saves `definition` under `container_id`, replacing any prior save.
    fn save_graph(
        &mut self,
        container_id: &str,
        definition: &PlaybookDefinition,
    ) -> Result<(), StoreError>;
}

/// Keeps playbooks in process memory. The store used by tests and
/// short-lived hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    playbooks: AHashMap<String, PlaybookDefinition>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.playbooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playbooks.is_empty()
    }
}

impl GraphStore for MemoryStore {
    fn load_graph(&self, container_id: &str) -> Result<Option<PlaybookDefinition>, StoreError> {
        Ok(self.playbooks.get(container_id).cloned())
    }

    fn save_graph(
        &mut self,
        container_id: &str,
        definition: &PlaybookDefinition,
    ) -> Result<(), StoreError> {
        self.playbooks
            .insert(container_id.to_string(), definition.clone());
        Ok(())
    }
}
