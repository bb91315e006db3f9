//! # Search results
//!
//! Dashboards, charts, and explores are normalized into one [`SearchResult`] type so
//! they can be filtered, sorted, pinned, and stored in dashboard sets uniformly.
//!
//! ## Types
//!
//! - [`SearchResult`] - tagged by `type`: `dashboard`, `chart`, or `explore`
//! - [`SavedItem`] - dashboard or chart fields, including `updated_at` and `views`
//! - [`ExploreItem`] - explore fields. Explores have no freshness or popularity data,
//!   so the fields don't exist rather than being empty.
//! - [`SearchFilter`] - text, space, and kind filtering
//! - [`SearchView`] - pinned sections (recent, favorites) followed by per-kind lists
//!
//! ## Explore ids
//!
//! Explores have no uuid. Their result id is `explore:{name}`. The prefix keeps ids
//! stable across fetches and distinct from dashboard and chart uuids in the same project.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    aggregate::ProjectResults,
    charts::Chart,
    config::EXPLORE_UUID_PREFIX,
    dashboards::Dashboard,
    explores::Explore,
    sort::{SortMode, sort_results},
    urls::{chart_url, dashboard_url, explore_url},
};

/// Resource kind of a search result.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResultKind {
    Dashboard,
    Chart,
    Explore,
}

/// Dashboard or chart search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    pub url: String,
}

/// Explore search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreItem {
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_name: Option<String>,
    pub url: String,
}

/// Unified search result.
///
/// `uuid` is unique within one project's combined results, but not across projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchResult {
    Dashboard(SavedItem),
    Chart(SavedItem),
    Explore(ExploreItem),
}

impl SearchResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Dashboard(_) => ResultKind::Dashboard,
            Self::Chart(_) => ResultKind::Chart,
            Self::Explore(_) => ResultKind::Explore,
        }
    }

    pub fn uuid(&self) -> &str {
        match self {
            Self::Dashboard(item) | Self::Chart(item) => &item.uuid,
            Self::Explore(item) => &item.uuid,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Dashboard(item) | Self::Chart(item) => &item.name,
            Self::Explore(item) => &item.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Dashboard(item) | Self::Chart(item) => item.description.as_deref(),
            Self::Explore(item) => item.description.as_deref(),
        }
    }

    pub fn space_name(&self) -> Option<&str> {
        match self {
            Self::Dashboard(item) | Self::Chart(item) => item.space_name.as_deref(),
            Self::Explore(item) => item.space_name.as_deref(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Dashboard(item) | Self::Chart(item) => &item.url,
            Self::Explore(item) => &item.url,
        }
    }

    /// Last update time. Always `None` for explores.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Dashboard(item) | Self::Chart(item) => item.updated_at,
            Self::Explore(_) => None,
        }
    }

    /// View count. Always `None` for explores.
    pub fn views(&self) -> Option<u64> {
        match self {
            Self::Dashboard(item) | Self::Chart(item) => item.views,
            Self::Explore(_) => None,
        }
    }
}

/// Result id for an explore.
pub fn explore_uuid(explore_name: &str) -> String {
    format!("{EXPLORE_UUID_PREFIX}{explore_name}")
}

/// Prefer the inline space name, then the lookup by space uuid.
fn resolve_space_name(
    inline: Option<&String>,
    space_uuid: &str,
    space_names: &HashMap<String, String>,
) -> Option<String> {
    inline.or_else(|| space_names.get(space_uuid)).cloned()
}

pub fn dashboard_result(
    dashboard: &Dashboard,
    space_names: &HashMap<String, String>,
    base_url: &str,
    project_uuid: &str,
) -> SearchResult {
    SearchResult::Dashboard(SavedItem {
        uuid: dashboard.uuid.clone(),
        name: dashboard.name.clone(),
        description: dashboard.description.clone(),
        space_name: resolve_space_name(
            dashboard.space_name.as_ref(),
            &dashboard.space_uuid,
            space_names,
        ),
        updated_at: dashboard.updated_at,
        views: dashboard.views,
        url: dashboard_url(base_url, project_uuid, &dashboard.uuid),
    })
}

pub fn chart_result(
    chart: &Chart,
    space_names: &HashMap<String, String>,
    base_url: &str,
    project_uuid: &str,
) -> SearchResult {
    SearchResult::Chart(SavedItem {
        uuid: chart.uuid.clone(),
        name: chart.name.clone(),
        description: chart.description.clone(),
        space_name: resolve_space_name(chart.space_name.as_ref(), &chart.space_uuid, space_names),
        updated_at: chart.updated_at,
        views: chart.views,
        url: chart_url(base_url, project_uuid, &chart.uuid),
    })
}

pub fn explore_result(explore: &Explore, base_url: &str, project_uuid: &str) -> SearchResult {
    SearchResult::Explore(ExploreItem {
        uuid: explore_uuid(&explore.name),
        name: explore.label.clone(),
        description: explore.description.clone(),
        space_name: explore.group_label.clone(),
        url: explore_url(base_url, project_uuid, &explore.name),
    })
}

/// Text, space, and kind filter applied before sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring of name, description, or space name
    pub text: Option<String>,
    /// Exact space name
    pub space: Option<String>,
    /// Only this kind
    pub kind: Option<ResultKind>,
}

impl SearchFilter {
    pub fn text(self, text: impl Into<String>) -> Self {
        SearchFilter {
            text: Some(text.into()),
            ..self
        }
    }

    pub fn space(self, space: impl Into<String>) -> Self {
        SearchFilter {
            space: Some(space.into()),
            ..self
        }
    }

    pub fn kind(self, kind: ResultKind) -> Self {
        SearchFilter {
            kind: Some(kind),
            ..self
        }
    }

    pub fn matches(&self, result: &SearchResult) -> bool {
        if let Some(kind) = self.kind
            && result.kind() != kind
        {
            return false;
        }
        if let Some(space) = self.space.as_deref().filter(|s| !s.is_empty())
            && result.space_name() != Some(space)
        {
            return false;
        }
        match self.text.as_deref().filter(|t| !t.is_empty()) {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                let contains = |field: Option<&str>| {
                    field.is_some_and(|value| value.to_lowercase().contains(&needle))
                };
                contains(Some(result.name()))
                    || contains(result.description())
                    || contains(result.space_name())
            }
        }
    }

    /// Returns matching results, in input order.
    pub fn apply(&self, results: &[SearchResult]) -> Vec<SearchResult> {
        results
            .iter()
            .filter(|result| self.matches(result))
            .cloned()
            .collect()
    }
}

/// Search results laid out in sections.
///
/// Recently opened and favorite items are pinned to the top and removed from the
/// per-kind sections so each item is listed once (an item both recent and
/// favorite appears in both pinned sections).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchView {
    pub recent: Vec<SearchResult>,
    pub favorites: Vec<SearchResult>,
    pub dashboards: Vec<SearchResult>,
    pub charts: Vec<SearchResult>,
    pub explores: Vec<SearchResult>,
}

impl SearchView {
    /// Builds the sections.
    /// - `recent_uuids`: most recent first. Ids not present in `results` are dropped.
    /// - `favorite_ids`: favorites keep the sorted dashboards, charts, explores order.
    pub fn build(
        results: &ProjectResults,
        filter: &SearchFilter,
        mode: SortMode,
        favorite_ids: &[String],
        recent_uuids: &[String],
    ) -> Self {
        let dashboards = sort_results(&filter.apply(&results.dashboards), mode);
        let charts = sort_results(&filter.apply(&results.charts), mode);
        let explores = sort_results(&filter.apply(&results.explores), mode);

        let favorite_ids: HashSet<&str> = favorite_ids.iter().map(String::as_str).collect();
        let all = || dashboards.iter().chain(charts.iter()).chain(explores.iter());

        let favorites: Vec<SearchResult> = all()
            .filter(|result| favorite_ids.contains(result.uuid()))
            .cloned()
            .collect();
        let recent: Vec<SearchResult> = recent_uuids
            .iter()
            .filter_map(|uuid| all().find(|result| result.uuid() == uuid))
            .cloned()
            .collect();

        let pinned: HashSet<String> = favorites
            .iter()
            .chain(recent.iter())
            .map(|result| result.uuid().to_string())
            .collect();
        let unpinned = |list: Vec<SearchResult>| -> Vec<SearchResult> {
            list.into_iter()
                .filter(|result| !pinned.contains(result.uuid()))
                .collect()
        };

        SearchView {
            dashboards: unpinned(dashboards),
            charts: unpinned(charts),
            explores: unpinned(explores),
            recent,
            favorites,
        }
    }

    /// Total number of listed items, counting pinned items once per section.
    pub fn len(&self) -> usize {
        self.recent.len()
            + self.favorites.len()
            + self.dashboards.len()
            + self.charts.len()
            + self.explores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sections with their titles, in display order.
    pub fn sections(&self) -> [(&'static str, &[SearchResult]); 5] {
        [
            ("Recently Opened", &self.recent),
            ("Favorites", &self.favorites),
            ("Dashboards", &self.dashboards),
            ("Charts", &self.charts),
            ("Explores", &self.explores),
        ]
    }
}
