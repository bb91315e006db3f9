//! Default project uuid, stored as a plain string (not JSON).

use std::sync::Arc;

use tracing::debug;

use crate::{Result, store::KeyValueStore};

/// Obtained from [`Collections::default_project`](crate::store::Collections::default_project).
#[derive(Debug, Clone)]
pub struct DefaultProject {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl DefaultProject {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>, key: String) -> Self {
        Self { store, key }
    }

    pub fn get(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(&self.key)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()))
    }

    pub fn set(&self, project_uuid: &str) -> Result<()> {
        debug!(project = %project_uuid, "set default project");
        self.store.set(&self.key, project_uuid)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}
