//! # Lightdash Spaces
//!
//! Spaces are folders that dashboards and charts belong to. The list response is
//! used to resolve a resource's space name when the resource omits it.
//!
//! - [spaces](LightdashClient::spaces) - list spaces in a project

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{Result, client::LightdashClient, http_client::HttpClient};

/// Represents a Lightdash space.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub uuid: String,
    pub name: String,
}

/// Builds the `space uuid -> space name` lookup.
pub fn space_names(spaces: &[Space]) -> HashMap<String, String> {
    spaces
        .iter()
        .map(|space| (space.uuid.clone(), space.name.clone()))
        .collect()
}

/// Request builder for listing spaces of a project.
///
/// Obtained via [`LightdashClient::spaces`].
#[derive(Debug)]
pub struct ListSpacesRequest {
    client: Arc<HttpClient>,
    project_uuid: String,
}

impl ListSpacesRequest {
    pub(crate) fn new(client: Arc<HttpClient>, project_uuid: impl Into<String>) -> Self {
        Self {
            client,
            project_uuid: project_uuid.into(),
        }
    }

    pub async fn list(self) -> Result<Vec<Space>> {
        self.client
            .get_results(&format!("/projects/{}/spaces", self.project_uuid))
            .await
    }
}

impl LightdashClient {
    /// List spaces in the project.
    pub fn spaces(&self, project_uuid: impl Into<String>) -> ListSpacesRequest {
        ListSpacesRequest::new(self.client.clone(), project_uuid)
    }
}
