//! # Sorting search results
//!
//! [`sort_results`] returns a new sorted list and leaves its input untouched.
//! Results missing the sort key (explores have no update time or views, and
//! dashboards and charts may omit them) always go last, whichever direction is chosen.
//! The sort is stable: results with equal keys keep their input order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::search::SearchResult;

/// Sort order for search results.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortMode {
    /// Name, A-Z
    #[default]
    NameAsc,
    /// Name, Z-A
    NameDesc,
    /// Least recently updated first
    UpdatedAsc,
    /// Most recently updated first
    UpdatedDesc,
    /// Fewest views first
    ViewsAsc,
    /// Most views first
    ViewsDesc,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::NameAsc => "Name (A-Z)",
            SortMode::NameDesc => "Name (Z-A)",
            SortMode::UpdatedAsc => "Oldest Updated",
            SortMode::UpdatedDesc => "Recently Updated",
            SortMode::ViewsAsc => "Least Viewed",
            SortMode::ViewsDesc => "Most Viewed",
        }
    }
}

/// Lowercased, with diacritics removed, so "Éclair" files under "e".
fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Locale-style name comparison: accent- and case-insensitive first, then
/// unaccented before accented, then lowercase before uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    fold_name(a)
        .cmp(&fold_name(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Compares optional keys. `None` sorts after every value regardless of `descending`.
fn compare_present_first<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if descending {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(a: &SearchResult, b: &SearchResult, mode: SortMode) -> Ordering {
    match mode {
        SortMode::NameAsc => compare_names(a.name(), b.name()),
        SortMode::NameDesc => compare_names(b.name(), a.name()),
        SortMode::UpdatedAsc => compare_present_first(a.updated_at(), b.updated_at(), false),
        SortMode::UpdatedDesc => compare_present_first(a.updated_at(), b.updated_at(), true),
        SortMode::ViewsAsc => compare_present_first(a.views(), b.views(), false),
        SortMode::ViewsDesc => compare_present_first(a.views(), b.views(), true),
    }
}

/// Returns a sorted copy of `results`.
pub fn sort_results(results: &[SearchResult], mode: SortMode) -> Vec<SearchResult> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| compare(a, b, mode));
    sorted
}

/// Merges two lists into one, most recently updated first.
/// Results without an update time go last, in input order.
pub fn merge_by_recency(first: &[SearchResult], second: &[SearchResult]) -> Vec<SearchResult> {
    let mut merged: Vec<SearchResult> = first.iter().chain(second.iter()).cloned().collect();
    merged.sort_by(|a, b| {
        compare_present_first::<DateTime<Utc>>(a.updated_at(), b.updated_at(), true)
    });
    merged
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::search::{ExploreItem, SavedItem};

    fn dashboard(name: &str, updated_at: Option<&str>, views: Option<u64>) -> SearchResult {
        SearchResult::Dashboard(saved(name, updated_at, views))
    }

    fn chart(name: &str, updated_at: Option<&str>, views: Option<u64>) -> SearchResult {
        SearchResult::Chart(saved(name, updated_at, views))
    }

    fn saved(name: &str, updated_at: Option<&str>, views: Option<u64>) -> SavedItem {
        SavedItem {
            uuid: name.to_lowercase(),
            name: name.into(),
            description: None,
            space_name: None,
            updated_at: updated_at.map(|s| s.parse().expect("timestamp")),
            views,
            url: String::new(),
        }
    }

    fn explore(name: &str) -> SearchResult {
        SearchResult::Explore(ExploreItem {
            uuid: format!("explore:{name}"),
            name: name.into(),
            description: None,
            space_name: None,
            url: String::new(),
        })
    }

    fn names(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(SearchResult::name).collect()
    }

    #[test]
    fn test_sort_by_name() {
        let input = vec![
            dashboard("Charlie", None, None),
            dashboard("Alpha", None, None),
            dashboard("Bravo", None, None),
        ];
        assert_eq!(
            names(&sort_results(&input, SortMode::NameAsc)),
            ["Alpha", "Bravo", "Charlie"]
        );
        assert_eq!(
            names(&sort_results(&input, SortMode::NameDesc)),
            ["Charlie", "Bravo", "Alpha"]
        );
        // input untouched
        assert_eq!(names(&input), ["Charlie", "Alpha", "Bravo"]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let input = vec![
            dashboard("beta", None, None),
            dashboard("Alpha", None, None),
            dashboard("alpha", None, None),
        ];
        assert_eq!(
            names(&sort_results(&input, SortMode::NameAsc)),
            ["alpha", "Alpha", "beta"]
        );
    }

    #[test]
    fn test_name_sort_folds_accents() {
        let input = vec![
            dashboard("Zeta", None, None),
            dashboard("Éclair", None, None),
            dashboard("eclair", None, None),
            dashboard("Delta", None, None),
        ];
        assert_eq!(
            names(&sort_results(&input, SortMode::NameAsc)),
            ["Delta", "eclair", "Éclair", "Zeta"]
        );
    }

    #[test]
    fn test_sort_by_views() {
        let input = vec![
            dashboard("Alpha", None, Some(10)),
            dashboard("Bravo", None, Some(50)),
            dashboard("Charlie", None, Some(30)),
        ];
        assert_eq!(
            names(&sort_results(&input, SortMode::ViewsDesc)),
            ["Bravo", "Charlie", "Alpha"]
        );
        assert_eq!(
            names(&sort_results(&input, SortMode::ViewsAsc)),
            ["Alpha", "Charlie", "Bravo"]
        );
    }

    #[test]
    fn test_missing_values_last_both_directions() {
        let input = vec![
            explore("Orders"),
            dashboard("Old", Some("2025-01-01T00:00:00Z"), Some(5)),
            dashboard("Unknown", None, None),
            dashboard("New", Some("2025-02-01T00:00:00Z"), Some(50)),
        ];
        assert_eq!(
            names(&sort_results(&input, SortMode::UpdatedDesc)),
            ["New", "Old", "Orders", "Unknown"]
        );
        assert_eq!(
            names(&sort_results(&input, SortMode::UpdatedAsc)),
            ["Old", "New", "Orders", "Unknown"]
        );
        assert_eq!(
            names(&sort_results(&input, SortMode::ViewsDesc)),
            ["New", "Old", "Orders", "Unknown"]
        );
        assert_eq!(
            names(&sort_results(&input, SortMode::ViewsAsc)),
            ["Old", "New", "Orders", "Unknown"]
        );
    }

    #[test]
    fn test_merge_by_recency() {
        let dashboards = vec![dashboard("d1", Some("2025-01-01T00:00:00Z"), None)];
        let charts = vec![
            chart("c1", Some("2025-01-20T00:00:00Z"), None),
            chart("c2", Some("2025-01-10T00:00:00Z"), None),
        ];
        let merged = merge_by_recency(&dashboards, &charts);
        assert_eq!(names(&merged), ["c1", "c2", "d1"]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_puts_undated_last() {
        let merged = merge_by_recency(
            &[dashboard("undated", None, None)],
            &[chart("dated", Some("2024-06-01T00:00:00Z"), None)],
        );
        assert_eq!(names(&merged), ["dated", "undated"]);
    }

    #[test]
    fn test_sort_mode_parse_and_label() {
        assert_eq!("updated-desc".parse::<SortMode>().ok(), Some(SortMode::UpdatedDesc));
        assert_eq!(SortMode::ViewsAsc.to_string(), "views-asc");
        assert_eq!(SortMode::default(), SortMode::NameAsc);
        assert_eq!(SortMode::iter().count(), 6);
        assert_eq!(SortMode::UpdatedDesc.label(), "Recently Updated");
    }
}
