//! common functions for cli
//!

use anyhow::{Result, anyhow};
use lightdash::prelude::*;
use tracing::debug;

use crate::cli::{AppContext, ProjectArg};

/// Project from the flag, else the stored default if it still exists, else the first project.
pub(crate) async fn resolve_project(ctx: &AppContext, arg: &ProjectArg) -> Result<String> {
    if let Some(project) = arg.project.as_deref() {
        return Ok(project.to_string());
    }
    let default = ctx.collections.default_project().get()?;
    let projects = ctx.client.projects().list().await?;
    let project = initial_project(default.as_deref(), &projects)
        .ok_or_else(|| anyhow!("no projects available"))?;
    debug!(%project, ?default, "resolved project");
    Ok(project)
}

/// Fetches search results of the project selected by `arg`.
pub(crate) async fn fetch_results(ctx: &AppContext, arg: &ProjectArg) -> Result<ProjectResults> {
    let project = resolve_project(ctx, arg).await?;
    Ok(ctx.client.project_search(project).fetch().await?)
}

/// Finds a search result by uuid in the project selected by `arg`.
pub(crate) async fn find_result(
    ctx: &AppContext,
    arg: &ProjectArg,
    uuid: &str,
) -> Result<SearchResult> {
    let results = fetch_results(ctx, arg).await?;
    results.find(uuid).cloned().ok_or_else(|| {
        LightdashError::NotFound {
            obj_type: "item".to_string(),
            key: uuid.to_string(),
        }
        .into()
    })
}

/// resolve set id or name into a set
pub(crate) fn resolve_set(ctx: &AppContext, id_or_name: &str) -> Result<DashboardSet> {
    let sets = ctx.collections.sets().list()?;
    if let Some(set) = sets.iter().find(|set| set.id == id_or_name) {
        return Ok(set.clone());
    }

    let needle = id_or_name.trim().to_lowercase();
    let matches: Vec<_> = sets
        .into_iter()
        .filter(|set| set.name.to_lowercase() == needle)
        .collect();

    match matches.len() {
        0 => Err(LightdashError::NotFound {
            obj_type: "set".to_string(),
            key: id_or_name.to_string(),
        }
        .into()),
        1 => Ok(matches[0].clone()),
        _ => Err(anyhow!("set name is ambiguous: {id_or_name}")),
    }
}
