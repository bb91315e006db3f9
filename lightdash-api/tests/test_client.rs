//! Integration tests for the http client: auth header, envelope, and error mapping.

mod common;

use common::*;
use lightdash::prelude::*;
use serde_json::json;
use wiremock::MockServer;

#[test_log::test(tokio::test)]
async fn test_projects_sent_with_api_key() -> TestResult {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/org/projects",
        json!([
            { "projectUuid": "p1", "name": "Project 1" },
            { "projectUuid": "p2", "name": "Project 2" }
        ]),
    )
    .await;

    let client = client_for(&server)?;
    let projects = client.projects().list().await?;
    assert_eq!(
        projects,
        vec![
            Project {
                project_uuid: "p1".into(),
                name: "Project 1".into()
            },
            Project {
                project_uuid: "p2".into(),
                name: "Project 2".into()
            },
        ]
    );

    let metrics = client.http_metrics();
    assert_eq!(metrics.total_requests, 1);
    assert_eq!(metrics.successful_responses, 1);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_wrong_key_is_not_matched() -> TestResult {
    let server = MockServer::start().await;
    mount_get(&server, "/org/projects", json!([])).await;

    let client = client_for(&server)?;
    client.set_api_key("other-key");
    // no mock matches the header, wiremock answers 404
    let err = client.projects().list().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_remote_error_carries_status() -> TestResult {
    let server = MockServer::start().await;
    mount_error(&server, "/org/projects", 401).await;
    mount_error(&server, "/projects/nonexistent/dashboards", 404).await;
    mount_error(&server, &format!("/projects/{PROJECT_UUID}/dashboards"), 500).await;

    let client = client_for(&server)?;

    let err = client.projects().list().await.unwrap_err();
    assert!(matches!(
        err,
        LightdashError::Remote { status: 401, .. }
    ));
    assert!(
        err.to_string().starts_with("Lightdash API error: 401 Unauthorized"),
        "{err}"
    );

    let err = client.dashboards("nonexistent").list().await.unwrap_err();
    assert!(err.to_string().starts_with("Lightdash API error: 404 Not Found"));

    let err = client.dashboards(PROJECT_UUID).list().await.unwrap_err();
    assert!(
        err.to_string()
            .starts_with("Lightdash API error: 500 Internal Server Error")
    );

    let metrics = client.http_metrics();
    assert_eq!(metrics.total_requests, 3);
    assert_eq!(metrics.errors, 3);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_transport_error() -> TestResult {
    let config = ClientConfig::default()
        .base_url("http://127.0.0.1:1")
        .api_key(TEST_KEY);
    let client = LightdashClient::with_config(config)?;

    let err = client.charts(PROJECT_UUID).list().await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert_eq!(err.status(), None);
    assert_eq!(client.http_metrics().errors, 1);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_missing_key_fails_before_request() -> TestResult {
    let server = MockServer::start().await;
    let client = client_for(&server)?;
    client.clear_api_key();

    let err = client.projects().list().await.unwrap_err();
    assert!(matches!(err, LightdashError::Auth { .. }));
    assert_eq!(client.http_metrics().total_requests, 0);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_unexpected_shape_is_deserialization_error() -> TestResult {
    let server = MockServer::start().await;
    mount_get(&server, "/org/projects", json!({ "not": "a list" })).await;

    let client = client_for(&server)?;
    let err = client.projects().list().await.unwrap_err();
    assert!(matches!(err, LightdashError::Deserialization { .. }));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_chart_detail() -> TestResult {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/saved/chart-001",
        json!({
            "uuid": "chart-001",
            "name": "Monthly Revenue Trend",
            "description": "Revenue by month",
            "tableName": "orders",
            "metricQuery": {
                "dimensions": ["orders_order_date_month"],
                "metrics": ["orders_total_revenue"]
            },
            "chartConfig": { "type": "cartesian" }
        }),
    )
    .await;

    let client = client_for(&server)?;
    let chart = client.chart("chart-001").get().await?;
    assert_eq!(chart.table_name, "orders");
    assert_eq!(chart.chart_type_label(), "Cartesian (Bar/Line/Area)");

    let md = chart.to_markdown();
    assert!(md.starts_with("# Monthly Revenue Trend"));
    assert!(md.contains("- `orders_total_revenue` - Orders Total Revenue"));
    Ok(())
}
