//! # Lightdash Projects
//!
//! ## Project methods on LightdashClient
//!
//! - [projects](LightdashClient::projects) - list projects in the user's organization
//!
//! ```rust,no_run
//! use lightdash::prelude::*;
//! # async fn example(client: &LightdashClient) -> Result<(), LightdashError> {
//! for project in client.projects().list().await? {
//!     println!("{} {}", project.project_uuid, project.name);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Result, client::LightdashClient, http_client::HttpClient};

/// A Lightdash project. Every dashboard, chart, space, and explore belongs to one project.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_uuid: String,
    pub name: String,
}

/// Request builder for listing projects.
///
/// Obtained via [`LightdashClient::projects`].
#[derive(Debug)]
pub struct ListProjectsRequest {
    client: Arc<HttpClient>,
}

impl ListProjectsRequest {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Lists projects of the organization.
    pub async fn list(self) -> Result<Vec<Project>> {
        self.client.get_results("/org/projects").await
    }
}

impl LightdashClient {
    /// List projects the authenticated user can access.
    pub fn projects(&self) -> ListProjectsRequest {
        ListProjectsRequest::new(self.client.clone())
    }
}
