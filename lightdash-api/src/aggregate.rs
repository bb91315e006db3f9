//! # Project search aggregation
//!
//! [`project_search`](LightdashClient::project_search) fetches dashboards, charts,
//! explores, and spaces of one project concurrently and converts them to
//! [`SearchResult`]s. The fetch is all-or-nothing: if any of the four requests fails,
//! the first error is returned and no partial results are produced.
//!
//! ```rust,no_run
//! use lightdash::prelude::*;
//! # async fn example(client: &LightdashClient) -> Result<(), LightdashError> {
//! let results = client.project_search("project-uuid").fetch().await?;
//! println!(
//!     "{} dashboards, {} charts, {} explores",
//!     results.dashboards.len(),
//!     results.charts.len(),
//!     results.explores.len()
//! );
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::{
    Result,
    charts::ListChartsRequest,
    client::LightdashClient,
    dashboards::ListDashboardsRequest,
    explores::ListExploresRequest,
    http_client::HttpClient,
    search::{SearchResult, chart_result, dashboard_result, explore_result},
    spaces::{ListSpacesRequest, Space, space_names},
};

/// Search results of one project, grouped by kind, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResults {
    pub project_uuid: String,
    pub dashboards: Vec<SearchResult>,
    pub charts: Vec<SearchResult>,
    pub explores: Vec<SearchResult>,
    pub spaces: Vec<Space>,
}

impl ProjectResults {
    /// Iterates dashboards, then charts, then explores.
    pub fn all(&self) -> impl Iterator<Item = &SearchResult> {
        self.dashboards
            .iter()
            .chain(self.charts.iter())
            .chain(self.explores.iter())
    }

    /// Finds a result by uuid (explores by `explore:{name}`).
    pub fn find(&self, uuid: &str) -> Option<&SearchResult> {
        self.all().find(|result| result.uuid() == uuid)
    }

    /// Total number of results.
    pub fn len(&self) -> usize {
        self.dashboards.len() + self.charts.len() + self.explores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct space names present in the results, sorted.
    pub fn space_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .all()
            .filter_map(|result| result.space_name().map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Request builder for the combined project search.
///
/// Obtained via [`LightdashClient::project_search`].
#[derive(Debug)]
pub struct ProjectSearchRequest {
    client: Arc<HttpClient>,
    project_uuid: String,
}

impl ProjectSearchRequest {
    pub(crate) fn new(client: Arc<HttpClient>, project_uuid: impl Into<String>) -> Self {
        Self {
            client,
            project_uuid: project_uuid.into(),
        }
    }

    /// Issues the four list requests concurrently and joins the results.
    pub async fn fetch(self) -> Result<ProjectResults> {
        let project_uuid = self.project_uuid;
        let (dashboards, charts, explores, spaces) = futures::try_join!(
            ListDashboardsRequest::new(self.client.clone(), project_uuid.clone()).list(),
            ListChartsRequest::new(self.client.clone(), project_uuid.clone()).list(),
            ListExploresRequest::new(self.client.clone(), project_uuid.clone()).list(),
            ListSpacesRequest::new(self.client.clone(), project_uuid.clone()).list(),
        )?;

        let lookup = space_names(&spaces);
        let base_url = self.client.base_url.as_str();
        let results = ProjectResults {
            dashboards: dashboards
                .iter()
                .map(|d| dashboard_result(d, &lookup, base_url, &project_uuid))
                .collect(),
            charts: charts
                .iter()
                .map(|c| chart_result(c, &lookup, base_url, &project_uuid))
                .collect(),
            explores: explores
                .iter()
                .map(|e| explore_result(e, base_url, &project_uuid))
                .collect(),
            spaces,
            project_uuid,
        };
        debug!(
            project = %results.project_uuid,
            dashboards = results.dashboards.len(),
            charts = results.charts.len(),
            explores = results.explores.len(),
            spaces = results.spaces.len(),
            "project search"
        );
        Ok(results)
    }
}

impl LightdashClient {
    /// Fetch dashboards, charts, explores, and spaces of a project as search results.
    pub fn project_search(&self, project_uuid: impl Into<String>) -> ProjectSearchRequest {
        ProjectSearchRequest::new(self.client.clone(), project_uuid)
    }
}
