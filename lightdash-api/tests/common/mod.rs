//! Shared test utilities for lightdash integration tests
//!
//! Tests run against a `wiremock` server standing in for a Lightdash instance:
//! - client creation pointed at the mock server
//! - `{status, results}` envelope responses
//! - sample dashboards, charts, explores, and spaces for one project
#![allow(dead_code)]

use std::time::Duration;

use lightdash::prelude::*;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

pub type TestResult<T = ()> = anyhow::Result<T>;

pub const TEST_KEY: &str = "ldt_test_token_123";
pub const PROJECT_UUID: &str = "project-uuid-123";

/// Client for the mock server, authenticated with [`TEST_KEY`].
pub fn client_for(server: &MockServer) -> TestResult<LightdashClient> {
    let config = ClientConfig::default()
        .base_url(server.uri())
        .api_key(TEST_KEY)
        .timeout(Some(Duration::from_secs(5)));
    Ok(LightdashClient::with_config(config)?)
}

/// 200 response wrapping `results` in the api envelope
pub fn envelope(results: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "ok", "results": results }))
}

/// Mounts an authenticated GET of `/api/v1{api_path}` returning `results`.
pub async fn mount_get(server: &MockServer, api_path: &str, results: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1{api_path}")))
        .and(header("authorization", format!("ApiKey {TEST_KEY}").as_str()))
        .respond_with(envelope(results))
        .mount(server)
        .await;
}

/// Mounts a GET of `/api/v1{api_path}` failing with `status`.
pub async fn mount_error(server: &MockServer, api_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1{api_path}")))
        .respond_with(ResponseTemplate::new(status).set_body_string("error"))
        .mount(server)
        .await;
}

pub fn dashboards_json() -> Value {
    json!([
        {
            "uuid": "dash-001",
            "name": "Revenue Overview",
            "description": "Company-wide revenue metrics",
            "spaceUuid": "space-finance",
            "spaceName": "Finance",
            "updatedAt": "2025-01-20T10:00:00Z",
            "views": 150
        },
        {
            "uuid": "dash-002",
            "name": "User Engagement",
            "spaceUuid": "space-product",
            "updatedAt": "2025-01-18T08:30:00Z",
            "views": 89
        }
    ])
}

pub fn charts_json() -> Value {
    json!([
        {
            "uuid": "chart-001",
            "name": "Monthly Revenue Trend",
            "description": "Revenue by month",
            "spaceUuid": "space-finance",
            "chartKind": "line",
            "updatedAt": "2025-01-22T09:00:00Z",
            "views": 200
        }
    ])
}

pub fn explores_json() -> Value {
    json!([
        {
            "name": "orders",
            "label": "Orders",
            "description": "All orders",
            "groupLabel": "Sales"
        }
    ])
}

pub fn spaces_json() -> Value {
    json!([
        { "uuid": "space-finance", "name": "Finance" },
        { "uuid": "space-product", "name": "Product" }
    ])
}

/// Mounts the four list endpoints for `project_uuid`.
pub async fn mount_project(server: &MockServer, project_uuid: &str) {
    mount_get(server, &format!("/projects/{project_uuid}/dashboards"), dashboards_json()).await;
    mount_get(server, &format!("/projects/{project_uuid}/charts"), charts_json()).await;
    mount_get(server, &format!("/projects/{project_uuid}/explores"), explores_json()).await;
    mount_get(server, &format!("/projects/{project_uuid}/spaces"), spaces_json()).await;
}
