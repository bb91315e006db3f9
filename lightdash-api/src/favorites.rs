//! Favorite search results, stored as a JSON array of uuids in insertion order.

use std::sync::Arc;

use tracing::debug;

use crate::{
    Result,
    store::{KeyValueStore, load, save},
};

/// Favorites collection. Obtained from [`Collections::favorites`](crate::store::Collections::favorites).
#[derive(Debug, Clone)]
pub struct Favorites {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl Favorites {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>, key: String) -> Self {
        Self { store, key }
    }

    /// Favorite uuids, oldest first, without duplicates.
    pub fn ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = load(self.store.as_ref(), &self.key)?;
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(id.clone()));
        Ok(ids)
    }

    pub fn is_favorite(&self, uuid: &str) -> Result<bool> {
        Ok(self.ids()?.iter().any(|id| id == uuid))
    }

    /// Adds or removes `uuid`. Returns true if it is now a favorite.
    pub fn toggle(&self, uuid: &str) -> Result<bool> {
        let mut ids = self.ids()?;
        let added = match ids.iter().position(|id| id == uuid) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(uuid.to_string());
                true
            }
        };
        save(self.store.as_ref(), &self.key, &ids)?;
        debug!(%uuid, added, "toggled favorite");
        Ok(added)
    }
}
