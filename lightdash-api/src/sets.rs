//! # Dashboard sets
//!
//! Named, ordered groups of search results that are opened together.
//! All sets are stored as one JSON array under the `dashboardSets` key.
//!
//! - [list](DashboardSets::list) - all sets, in creation order
//! - [get](DashboardSets::get) - one set by id
//! - [create](DashboardSets::create) - new empty set
//! - [create_and_add](DashboardSets::create_and_add) - new set holding one item
//! - [rename](DashboardSets::rename)
//! - [delete](DashboardSets::delete)
//! - [add_item](DashboardSets::add_item) - append an item; no-op if already present
//! - [remove_item](DashboardSets::remove_item)
//! - [urls_of](DashboardSets::urls_of) - browser urls of a set's items, in order
//!
//! Mutations return the updated list of sets. Operations naming a set id that
//! doesn't exist leave the stored sets unchanged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use tracing::debug;

use crate::{
    Result,
    error::ValidationSnafu,
    search::{ResultKind, SearchResult},
    store::{KeyValueStore, load, save, try_load},
};

/// Item stored in a dashboard set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSetItem {
    pub uuid: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
}

impl From<&SearchResult> for DashboardSetItem {
    fn from(result: &SearchResult) -> Self {
        Self {
            uuid: result.uuid().to_string(),
            name: result.name().to_string(),
            url: result.url().to_string(),
            kind: result.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSet {
    pub id: String,
    pub name: String,
    pub items: Vec<DashboardSetItem>,
    pub created_at: DateTime<Utc>,
}

impl DashboardSet {
    pub fn contains(&self, uuid: &str) -> bool {
        self.items.iter().any(|item| item.uuid == uuid)
    }
}

/// Dashboard set collection. Obtained from [`Collections::sets`](crate::store::Collections::sets).
#[derive(Debug, Clone)]
pub struct DashboardSets {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

fn validated_name(name: &str) -> Result<String> {
    let name = name.trim();
    ensure!(
        !name.is_empty(),
        ValidationSnafu {
            message: "set name must not be empty",
        }
    );
    Ok(name.to_string())
}

impl DashboardSets {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>, key: String) -> Self {
        Self { store, key }
    }

    /// All sets. A corrupt stored value is discarded and an empty list returned.
    pub fn list(&self) -> Result<Vec<DashboardSet>> {
        Ok(load(self.store.as_ref(), &self.key)?)
    }

    /// Like [`list`](Self::list), but returns `StorageError::Malformed` for a
    /// corrupt stored value instead of discarding it.
    pub fn try_list(&self) -> Result<Vec<DashboardSet>> {
        Ok(try_load(self.store.as_ref(), &self.key)?)
    }

    pub fn get(&self, id: &str) -> Result<Option<DashboardSet>> {
        Ok(self.list()?.into_iter().find(|set| set.id == id))
    }

    fn save(&self, sets: Vec<DashboardSet>) -> Result<Vec<DashboardSet>> {
        save(self.store.as_ref(), &self.key, &sets)?;
        Ok(sets)
    }

    /// Applies `f` to the set with `id`, if present, and saves.
    fn update(
        &self,
        id: &str,
        f: impl FnOnce(&mut DashboardSet),
    ) -> Result<Vec<DashboardSet>> {
        let mut sets = self.list()?;
        match sets.iter_mut().find(|set| set.id == id) {
            Some(set) => f(set),
            None => {
                debug!(set = %id, "set not found");
                return Ok(sets);
            }
        }
        self.save(sets)
    }

    fn insert(&self, name: &str, items: Vec<DashboardSetItem>) -> Result<DashboardSet> {
        let set = DashboardSet {
            id: uuid::Uuid::new_v4().to_string(),
            name: validated_name(name)?,
            items,
            created_at: Utc::now(),
        };
        let mut sets = self.list()?;
        sets.push(set.clone());
        self.save(sets)?;
        debug!(set = %set.id, name = %set.name, "created set");
        Ok(set)
    }

    /// Creates an empty set. The name is trimmed and must not be blank.
    pub fn create(&self, name: &str) -> Result<DashboardSet> {
        self.insert(name, Vec::new())
    }

    /// Creates a set containing `item`.
    pub fn create_and_add(&self, name: &str, item: DashboardSetItem) -> Result<DashboardSet> {
        self.insert(name, vec![item])
    }

    pub fn delete(&self, id: &str) -> Result<Vec<DashboardSet>> {
        let mut sets = self.list()?;
        let before = sets.len();
        sets.retain(|set| set.id != id);
        if sets.len() == before {
            return Ok(sets);
        }
        self.save(sets)
    }

    /// Renames a set. The name is trimmed and must not be blank.
    pub fn rename(&self, id: &str, name: &str) -> Result<Vec<DashboardSet>> {
        let name = validated_name(name)?;
        self.update(id, |set| set.name = name)
    }

    /// Appends `item` unless an item with the same uuid is already in the set.
    pub fn add_item(&self, set_id: &str, item: DashboardSetItem) -> Result<Vec<DashboardSet>> {
        self.update(set_id, |set| {
            if !set.contains(&item.uuid) {
                set.items.push(item);
            }
        })
    }

    pub fn remove_item(&self, set_id: &str, uuid: &str) -> Result<Vec<DashboardSet>> {
        self.update(set_id, |set| set.items.retain(|item| item.uuid != uuid))
    }

    /// Urls of the set's items, in item order.
    pub fn urls_of(set: &DashboardSet) -> Vec<String> {
        set.items.iter().map(|item| item.url.clone()).collect()
    }
}
