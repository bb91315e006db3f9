//! Browser urls for Lightdash resources
//!
//! These are the links handed to a browser or clipboard, so the path shapes
//! must stay exactly as the Lightdash web app expects them.
//!
//! - [`normalize_base_url`] - strip trailing slashes
//! - [`dashboard_url`] - `{base}/projects/{project}/dashboards/{dashboard}`
//! - [`chart_url`] - `{base}/projects/{project}/saved/{chart}`
//! - [`explore_url`] - `{base}/projects/{project}/tables/{explore}` (explore name percent-encoded)

/// Removes all trailing `/` characters from the instance url.
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

pub fn dashboard_url(base_url: &str, project_uuid: &str, dashboard_uuid: &str) -> String {
    format!(
        "{}/projects/{project_uuid}/dashboards/{dashboard_uuid}",
        normalize_base_url(base_url)
    )
}

pub fn chart_url(base_url: &str, project_uuid: &str, chart_uuid: &str) -> String {
    format!(
        "{}/projects/{project_uuid}/saved/{chart_uuid}",
        normalize_base_url(base_url)
    )
}

/// Explore names may contain spaces and slashes, so the name is encoded as a single path segment.
pub fn explore_url(base_url: &str, project_uuid: &str, explore_name: &str) -> String {
    format!(
        "{}/projects/{project_uuid}/tables/{}",
        normalize_base_url(base_url),
        urlencoding::encode(explore_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://app.lightdash.cloud";

    #[test]
    fn test_normalize_strips_any_number_of_slashes() {
        for n in 0..5 {
            let base = format!("{BASE_URL}{}", "/".repeat(n));
            assert_eq!(normalize_base_url(&base), BASE_URL, "{n} trailing slashes");
        }
    }

    #[test]
    fn test_normalize_keeps_inner_slashes() {
        assert_eq!(
            normalize_base_url("https://example.com/lightdash//"),
            "https://example.com/lightdash"
        );
    }

    #[test]
    fn test_dashboard_url() {
        assert_eq!(
            dashboard_url(BASE_URL, "project-123", "dash-456"),
            "https://app.lightdash.cloud/projects/project-123/dashboards/dash-456"
        );
        assert_eq!(
            dashboard_url("https://app.lightdash.cloud/", "project-123", "dash-456"),
            "https://app.lightdash.cloud/projects/project-123/dashboards/dash-456"
        );
    }

    #[test]
    fn test_chart_url() {
        assert_eq!(
            chart_url("https://custom.example.com///", "p1", "chart-789"),
            "https://custom.example.com/projects/p1/saved/chart-789"
        );
    }

    #[test]
    fn test_explore_url_encodes_name() {
        assert_eq!(
            explore_url(BASE_URL, "p1", "orders"),
            "https://app.lightdash.cloud/projects/p1/tables/orders"
        );
        assert_eq!(
            explore_url(BASE_URL, "p1", "my table/test"),
            "https://app.lightdash.cloud/projects/p1/tables/my%20table%2Ftest"
        );
    }

    #[test]
    fn test_project_segment_only_changes() {
        let a = dashboard_url(BASE_URL, "project-a", "dash-001");
        let b = dashboard_url(BASE_URL, "project-b", "dash-001");
        assert_ne!(a, b);
        assert_eq!(a.replace("project-a", "project-b"), b);

        let a = explore_url(BASE_URL, "project-a", "my table");
        let b = explore_url(BASE_URL, "project-b", "my table");
        assert_eq!(a.replace("project-a", "project-b"), b);
    }
}
