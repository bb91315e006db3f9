//! # Lightdash Dashboards
//!
//! - [dashboards](LightdashClient::dashboards) - list dashboards in a project

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, client::LightdashClient, http_client::HttpClient};

/// Dashboard summary as returned by the project dashboards endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub space_uuid: String,
    /// Inline space name. Older servers omit it; see [`crate::spaces::space_names`].
    #[serde(default)]
    pub space_name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub views: Option<u64>,
}

/// Request builder for listing dashboards of a project.
///
/// Obtained via [`LightdashClient::dashboards`].
#[derive(Debug)]
pub struct ListDashboardsRequest {
    client: Arc<HttpClient>,
    project_uuid: String,
}

impl ListDashboardsRequest {
    pub(crate) fn new(client: Arc<HttpClient>, project_uuid: impl Into<String>) -> Self {
        Self {
            client,
            project_uuid: project_uuid.into(),
        }
    }

    pub async fn list(self) -> Result<Vec<Dashboard>> {
        self.client
            .get_results(&format!("/projects/{}/dashboards", self.project_uuid))
            .await
    }
}

impl LightdashClient {
    /// List dashboards in the project.
    pub fn dashboards(&self, project_uuid: impl Into<String>) -> ListDashboardsRequest {
        ListDashboardsRequest::new(self.client.clone(), project_uuid)
    }
}
