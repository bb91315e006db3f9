//! # Lightdash Charts
//!
//! ## Chart methods on LightdashClient
//!
//! - [charts](LightdashClient::charts) - list saved charts in a project
//! - [chart](LightdashClient::chart) - get chart details (table, dimensions, metrics, chart type)
//!
//! ```rust,no_run
//! use lightdash::prelude::*;
//! # async fn example(client: &LightdashClient) -> Result<(), LightdashError> {
//! let detail = client.chart("chart-uuid").get().await?;
//! println!("{}", detail.to_markdown());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, client::LightdashClient, http_client::HttpClient};

/// Chart summary as returned by the project charts endpoint.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub space_uuid: String,
    #[serde(default)]
    pub space_name: Option<String>,
    #[serde(default)]
    pub chart_kind: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub views: Option<u64>,
}

/// Fields selected by a saved chart's query
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetricQuery {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Visualization type, e.g. "cartesian", "big_number", "table"
    #[serde(rename = "type")]
    pub chart_type: String,
}

/// Chart detail from `/saved/{chartUuid}`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedChart {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub table_name: String,
    pub metric_query: MetricQuery,
    pub chart_config: ChartConfig,
}

impl SavedChart {
    /// Friendly name of the visualization type.
    pub fn chart_type_label(&self) -> &str {
        chart_type_label(&self.chart_config.chart_type)
    }

    /// Markdown summary: name, description, overview table, dimensions, and metrics.
    pub fn to_markdown(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.push(format!("# {}", self.name));
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            parts.push(description.to_string());
        }

        parts.push("## Overview".to_string());
        parts.push(
            [
                "| Property | Value |".to_string(),
                "|----------|-------|".to_string(),
                format!("| **Table** | `{}` |", self.table_name),
                format!("| **Chart Type** | {} |", self.chart_type_label()),
            ]
            .join("\n"),
        );

        if !self.metric_query.dimensions.is_empty() {
            parts.push("## Dimensions".to_string());
            parts.push(field_list(&self.metric_query.dimensions));
        }
        if !self.metric_query.metrics.is_empty() {
            parts.push("## Metrics".to_string());
            parts.push(field_list(&self.metric_query.metrics));
        }
        parts.join("\n\n")
    }
}

fn field_list(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| format!("- `{field}` - {}", humanize_field(field)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn chart_type_label(chart_type: &str) -> &str {
    match chart_type {
        "cartesian" => "Cartesian (Bar/Line/Area)",
        "big_number" => "Big Number",
        "table" => "Table",
        "pie" => "Pie",
        "funnel" => "Funnel",
        "treemap" => "Treemap",
        "gauge" => "Gauge",
        "map" => "Map",
        "scatter" => "Scatter",
        "mixed" => "Mixed",
        other => other,
    }
}

/// `orders_total_revenue` -> `Orders Total Revenue`
fn humanize_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut word_start = true;
    for ch in field.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        word_start = !(ch.is_alphanumeric());
    }
    out
}

/// Request builder for listing charts of a project.
///
/// Obtained via [`LightdashClient::charts`].
#[derive(Debug)]
pub struct ListChartsRequest {
    client: Arc<HttpClient>,
    project_uuid: String,
}

impl ListChartsRequest {
    pub(crate) fn new(client: Arc<HttpClient>, project_uuid: impl Into<String>) -> Self {
        Self {
            client,
            project_uuid: project_uuid.into(),
        }
    }

    pub async fn list(self) -> Result<Vec<Chart>> {
        self.client
            .get_results(&format!("/projects/{}/charts", self.project_uuid))
            .await
    }
}

/// Request builder for getting chart details.
///
/// Obtained via [`LightdashClient::chart`].
#[derive(Debug)]
pub struct ChartRequest {
    client: Arc<HttpClient>,
    chart_uuid: String,
}

impl ChartRequest {
    pub(crate) fn new(client: Arc<HttpClient>, chart_uuid: impl Into<String>) -> Self {
        Self {
            client,
            chart_uuid: chart_uuid.into(),
        }
    }

    pub async fn get(self) -> Result<SavedChart> {
        self.client
            .get_results(&format!("/saved/{}", self.chart_uuid))
            .await
    }
}

impl LightdashClient {
    /// List saved charts in the project.
    pub fn charts(&self, project_uuid: impl Into<String>) -> ListChartsRequest {
        ListChartsRequest::new(self.client.clone(), project_uuid)
    }

    /// Get chart details.
    pub fn chart(&self, chart_uuid: impl Into<String>) -> ChartRequest {
        ChartRequest::new(self.client.clone(), chart_uuid)
    }
}
