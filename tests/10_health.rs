mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/health").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn health_reports_unavailable_store() -> Result<()> {
    let app = common::TestApp::new();
    app.store.set_unavailable(true);

    let res = app.get("/health").await?;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["endpoints"]["signup"].is_string());
    Ok(())
}
