/*
 * Lightdash rust api client
 *
 * SPDX-FileCopyrightText: 2025-2026 Steve Schoettler
 * SPDX-License-Identifier: Apache-2.0
 */
//! # Lightdash Rust API Client
//!
//! Search Lightdash dashboards, charts, and explores, and keep small local
//! collections (favorites, recently opened, dashboard sets) next to them.
//!
//! ## Features
//!
//! - typed requests for projects, spaces, dashboards, charts, explores, and chart details
//! - per-project aggregation: four requests in parallel, joined into one result type
//! - six sort modes with missing-values-last ordering
//! - favorites, recents, and dashboard sets persisted in a key-value store,
//!   self-healing when a stored blob is corrupt
//! - stale-result protection when the selected project changes
//! - companion cli tool (`ldr`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lightdash::prelude::*;
//! # async fn example() -> Result<(), LightdashError> {
//!
//! let config = ClientConfig::default()
//!     .base_url("https://app.lightdash.cloud")
//!     .api_key("my-personal-access-token");
//! let client = LightdashClient::with_config(config)?;
//!
//! // pick a project
//! let projects = client.projects().list().await?;
//! let project = &projects[0];
//!
//! // fetch dashboards, charts, and explores for the project
//! let results = client.project_search(&project.project_uuid).fetch().await?;
//!
//! // sort and filter
//! let filter = SearchFilter::default().text("revenue");
//! let dashboards = sort_results(&filter.apply(&results.dashboards), SortMode::UpdatedDesc);
//! for item in &dashboards {
//!     println!("{} {}", item.name(), item.url());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Local collections
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lightdash::prelude::*;
//! # fn example(item: &SearchResult) -> Result<(), LightdashError> {
//! let store = Arc::new(FileStore::new("/tmp/lightdash-data")?);
//! let collections = Collections::new(store, StorageKeys::default());
//!
//! let set = collections.sets().create("Morning Dashboards")?;
//! collections.sets().add_item(&set.id, DashboardSetItem::from(item))?;
//! collections.favorites().toggle(item.uuid())?;
//! collections.recent().track_open(item.uuid())?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Notes on API Design
//!
//! - Methods on `LightdashClient` return request builders, executed with a
//!   terminal verb like `list()`, `get()`, or `fetch()`.
//! - The `{status, results}` response envelope is unwrapped so callers get the inner type.
//! - `SearchResult` is an enum: explores have no `updated_at` or `views` fields at all.
//! - Collections are read-modify-write over whole blobs. Concurrent writers: last write wins.
//!
#![allow(clippy::missing_errors_doc)] // pedantic
#![allow(clippy::missing_const_for_fn)] //  nursery function
#![allow(clippy::must_use_candidate)] // pedantic
#![warn(clippy::default_trait_access)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::match_same_arms)]
#![warn(clippy::redundant_clone)]
#![warn(clippy::redundant_closure)]
#![warn(clippy::uninlined_format_args)]
#![warn(clippy::unused_async)]

pub mod aggregate;
pub mod charts;
pub mod client;
pub mod dashboards;
pub mod default_project;
pub mod error;
pub mod explores;
pub mod favorites;
mod http_client;
pub mod projects;
pub mod recent;
pub mod search;
pub mod selection;
pub mod sets;
pub mod sort;
pub mod spaces;
pub mod store;
pub mod urls;

/// Result type alias using `LightdashError` as the default error.
pub type Result<T, E = crate::error::LightdashError> = std::result::Result<T, E>;

/// Prelude module - import (nearly) all the things with `use lightdash::prelude::*;`
pub mod prelude {
    pub use super::LIGHTDASH_CLOUD_URL;
    // Error types
    pub use crate::error::*;
    pub use crate::{
        // Aggregation
        aggregate::ProjectResults,
        // Charts
        charts::{Chart, ChartConfig, MetricQuery, SavedChart},
        // Client
        client::{ApiKey, ClientConfig, LightdashClient},
        // Dashboards
        dashboards::Dashboard,
        // Default project
        default_project::DefaultProject,
        // Explores
        explores::Explore,
        // Favorites
        favorites::Favorites,
        // HTTP metrics
        http_client::HttpMetricsSnapshot,
        // Projects
        projects::Project,
        // Recently opened
        recent::{RecentEntry, RecentOpens},
        // Search results
        search::{ExploreItem, ResultKind, SavedItem, SearchFilter, SearchResult, SearchView},
        // Project selection
        selection::{ProjectSelection, SelectionTicket, initial_project},
        // Dashboard sets
        sets::{DashboardSet, DashboardSetItem, DashboardSets},
        // Sorting
        sort::{SortMode, merge_by_recency, sort_results},
        // Spaces
        spaces::Space,
        // Storage
        store::{Collections, FileStore, KeyValueStore, MemoryStore, StorageKeys},
        // Browser urls
        urls::{chart_url, dashboard_url, explore_url, normalize_base_url},
    };
}

// ============================================================================
// CONSTANTS
// ============================================================================

/// Lightdash cloud instance, used when no base url is configured
pub const LIGHTDASH_CLOUD_URL: &str = "https://app.lightdash.cloud";

pub(crate) mod config {
    /// Environment variable for default instance url
    pub const LIGHTDASH_URL_ENV: &str = "LIGHTDASH_URL";

    /// Environment variable for the personal access token
    pub const LIGHTDASH_API_KEY_ENV: &str = "LIGHTDASH_API_KEY";

    /// Environment variable to override the request timeout (seconds)
    pub const LIGHTDASH_TIMEOUT_ENV: &str = "LIGHTDASH_TIMEOUT_SECS";

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Prefix for all rest api paths
    pub const API_PREFIX: &str = "/api/v1";

    /// Maximum number of recently opened entries kept
    pub const MAX_RECENT: usize = 10;

    /// Prefix for explore search result ids
    pub const EXPLORE_UUID_PREFIX: &str = "explore:";

    // Default storage keys
    pub const KEY_DASHBOARD_SETS: &str = "dashboardSets";
    pub const KEY_FAVORITES: &str = "favorites";
    pub const KEY_RECENT: &str = "recentlyOpened";
    pub const KEY_DEFAULT_PROJECT: &str = "defaultProjectUuid";
}
