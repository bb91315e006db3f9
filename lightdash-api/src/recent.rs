//! Recently opened search results, most recent first, capped at ten entries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    config::MAX_RECENT,
    store::{KeyValueStore, load, save},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    pub uuid: String,
    pub opened_at: DateTime<Utc>,
}

/// Recently opened collection. Obtained from [`Collections::recent`](crate::store::Collections::recent).
#[derive(Debug, Clone)]
pub struct RecentOpens {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl RecentOpens {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>, key: String) -> Self {
        Self { store, key }
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> Result<Vec<RecentEntry>> {
        Ok(load(self.store.as_ref(), &self.key)?)
    }

    /// Uuids, most recent first.
    pub fn uuids(&self) -> Result<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|e| e.uuid).collect())
    }

    /// Records an open now.
    pub fn track_open(&self, uuid: &str) -> Result<Vec<RecentEntry>> {
        self.track_open_at(uuid, Utc::now())
    }

    /// Moves `uuid` to the front with time `opened_at`, dropping any earlier
    /// entry for it and the oldest entries beyond the cap.
    pub fn track_open_at(&self, uuid: &str, opened_at: DateTime<Utc>) -> Result<Vec<RecentEntry>> {
        let mut entries = self.entries()?;
        entries.retain(|e| e.uuid != uuid);
        entries.insert(
            0,
            RecentEntry {
                uuid: uuid.to_string(),
                opened_at,
            },
        );
        entries.truncate(MAX_RECENT);
        save(self.store.as_ref(), &self.key, &entries)?;
        Ok(entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}
