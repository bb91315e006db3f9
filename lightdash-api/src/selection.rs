//! # Project selection
//!
//! Tracks which project is selected and guards against stale results: each
//! selection produces a [`SelectionTicket`], and results are accepted only for the
//! ticket of the latest selection. A slow fetch for project A that completes after
//! the user switched to project B is discarded.
//!
//! ```rust,no_run
//! use lightdash::prelude::*;
//! # async fn example(client: &LightdashClient) -> Result<(), LightdashError> {
//! let selection = ProjectSelection::new();
//! let ticket = selection.select("project-a");
//! selection.refresh(client, &ticket).await?;
//! if let Some(results) = selection.current() {
//!     println!("{} results", results.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::{Result, aggregate::ProjectResults, client::LightdashClient, projects::Project};

/// Chooses the project to select at startup: the stored default if it still
/// exists, otherwise the first project.
pub fn initial_project(default_project: Option<&str>, projects: &[Project]) -> Option<String> {
    default_project
        .and_then(|uuid| projects.iter().find(|p| p.project_uuid == uuid))
        .or_else(|| projects.first())
        .map(|p| p.project_uuid.clone())
}

/// Identifies one selection. Obtained from [`ProjectSelection::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    project_uuid: String,
}

impl SelectionTicket {
    pub fn project_uuid(&self) -> &str {
        &self.project_uuid
    }
}

#[derive(Debug, Default)]
struct SelectionState {
    generation: u64,
    project_uuid: Option<String>,
    results: Option<Arc<ProjectResults>>,
}

/// Currently selected project and its latest results.
#[derive(Debug, Default)]
pub struct ProjectSelection {
    state: Mutex<SelectionState>,
}

impl ProjectSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a project. Clears results of the previous selection and
    /// invalidates all outstanding tickets.
    pub fn select(&self, project_uuid: impl Into<String>) -> SelectionTicket {
        let project_uuid = project_uuid.into();
        let mut state = self.state.lock();
        state.generation += 1;
        state.project_uuid = Some(project_uuid.clone());
        state.results = None;
        SelectionTicket {
            generation: state.generation,
            project_uuid,
        }
    }

    /// Returns true if `ticket` belongs to the latest selection.
    pub fn is_current(&self, ticket: &SelectionTicket) -> bool {
        self.state.lock().generation == ticket.generation
    }

    /// Stores results for `ticket`. Returns false, discarding the results,
    /// if another project was selected since the ticket was issued.
    pub fn complete(&self, ticket: &SelectionTicket, results: ProjectResults) -> bool {
        let mut state = self.state.lock();
        if state.generation != ticket.generation {
            debug!(
                project = %ticket.project_uuid,
                "discarding results of superseded selection"
            );
            return false;
        }
        state.results = Some(Arc::new(results));
        true
    }

    /// Selected project uuid
    pub fn project_uuid(&self) -> Option<String> {
        self.state.lock().project_uuid.clone()
    }

    /// Results of the current selection, if its fetch completed.
    pub fn current(&self) -> Option<Arc<ProjectResults>> {
        self.state.lock().results.clone()
    }

    /// Fetches results for `ticket` and stores them if the ticket is still current.
    /// Returns whether the results were stored. Fetch errors are returned even
    /// when the ticket is stale.
    pub async fn refresh(&self, client: &LightdashClient, ticket: &SelectionTicket) -> Result<bool> {
        let results = client.project_search(&ticket.project_uuid).fetch().await?;
        Ok(self.complete(ticket, results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(uuid: &str) -> Project {
        Project {
            project_uuid: uuid.into(),
            name: uuid.to_uppercase(),
        }
    }

    fn results(project_uuid: &str) -> ProjectResults {
        ProjectResults {
            project_uuid: project_uuid.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_project() {
        let projects = vec![project("p1"), project("p2")];
        assert_eq!(initial_project(Some("p2"), &projects).as_deref(), Some("p2"));
        assert_eq!(initial_project(Some("gone"), &projects).as_deref(), Some("p1"));
        assert_eq!(initial_project(None, &projects).as_deref(), Some("p1"));
        assert_eq!(initial_project(Some("p1"), &[]), None);
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let selection = ProjectSelection::new();
        let first = selection.select("a");
        let second = selection.select("b");
        assert!(!selection.is_current(&first));
        assert!(selection.is_current(&second));

        assert!(selection.complete(&second, results("b")));
        assert!(!selection.complete(&first, results("a")));

        let current = selection.current().expect("results for b");
        assert_eq!(current.project_uuid, "b");
        assert_eq!(selection.project_uuid().as_deref(), Some("b"));
    }

    #[test]
    fn test_select_clears_previous_results() {
        let selection = ProjectSelection::new();
        let ticket = selection.select("a");
        assert!(selection.complete(&ticket, results("a")));
        assert!(selection.current().is_some());

        // reselecting the same project is a new selection
        let again = selection.select("a");
        assert!(selection.current().is_none());
        assert!(!selection.is_current(&ticket));
        assert_eq!(again.project_uuid(), "a");
    }
}
