//! # Lightdash Explores
//!
//! Explores are queryable table definitions. Unlike dashboards and charts they
//! have no uuid, update time, or view count; the `name` is the identifier.
//!
//! - [explores](LightdashClient::explores) - list explores in a project

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Result, client::LightdashClient, http_client::HttpClient};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Explore {
    /// Table name, unique in the project
    pub name: String,
    /// Display name
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Group shown in the Lightdash sidebar
    #[serde(default)]
    pub group_label: Option<String>,
}

/// Request builder for listing explores of a project.
///
/// Obtained via [`LightdashClient::explores`].
#[derive(Debug)]
pub struct ListExploresRequest {
    client: Arc<HttpClient>,
    project_uuid: String,
}

impl ListExploresRequest {
    pub(crate) fn new(client: Arc<HttpClient>, project_uuid: impl Into<String>) -> Self {
        Self {
            client,
            project_uuid: project_uuid.into(),
        }
    }

    pub async fn list(self) -> Result<Vec<Explore>> {
        self.client
            .get_results(&format!("/projects/{}/explores", self.project_uuid))
            .await
    }
}

impl LightdashClient {
    /// List explores in the project.
    pub fn explores(&self, project_uuid: impl Into<String>) -> ListExploresRequest {
        ListExploresRequest::new(self.client.clone(), project_uuid)
    }
}
