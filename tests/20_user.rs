mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use blog_api_rust::auth;
use blog_api_rust::config::AppConfig;

#[tokio::test]
async fn signup_returns_token_for_new_subject() -> Result<()> {
    let app = common::TestApp::new();

    let token = app.signup("ada@example.com", "hunter2").await?;

    assert!(auth::verify(&token, common::TEST_SECRET).is_ok());
    Ok(())
}

#[tokio::test]
async fn signin_returns_token_for_same_subject() -> Result<()> {
    let app = common::TestApp::new();
    let signup_token = app.signup("ada@example.com", "hunter2").await?;

    let res = app
        .send(
            "POST",
            "/api/v1/user/signin",
            None,
            Some(json!({ "email": "ada@example.com", "password": "hunter2" })),
        )
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    let signin_token = common::jwt_of(&res)?;
    assert_eq!(
        auth::verify(&signin_token, common::TEST_SECRET)?,
        auth::verify(&signup_token, common::TEST_SECRET)?
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_is_forbidden() -> Result<()> {
    let app = common::TestApp::new();
    app.signup("ada@example.com", "hunter2").await?;

    let res = app
        .send(
            "POST",
            "/api/v1/user/signup",
            None,
            Some(json!({ "email": "ada@example.com", "password": "other" })),
        )
        .await?;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "Error while signing up");
    Ok(())
}

#[tokio::test]
async fn invalid_signup_never_reaches_store() -> Result<()> {
    let app = common::TestApp::new();

    let res = app
        .send(
            "POST",
            "/api/v1/user/signup",
            None,
            Some(json!({ "email": "not-an-email", "password": "x" })),
        )
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid input for signing up");
    assert_eq!(res.body["issues"][0]["field"], "email");
    assert_eq!(app.store.operations(), 0);

    let res = app
        .send("POST", "/api/v1/user/signup", None, Some(json!({ "email": "a@example.com" })))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.operations(), 0);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let app = common::TestApp::new();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/user/signin")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))?;
    let res = app.send_request(request).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid input for signing in");
    assert_eq!(app.store.operations(), 0);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() -> Result<()> {
    let app = common::TestApp::new();
    app.signup("ada@example.com", "hunter2").await?;

    let wrong_password = app
        .send(
            "POST",
            "/api/v1/user/signin",
            None,
            Some(json!({ "email": "ada@example.com", "password": "nope" })),
        )
        .await?;
    let unknown_email = app
        .send(
            "POST",
            "/api/v1/user/signin",
            None,
            Some(json!({ "email": "bob@example.com", "password": "hunter2" })),
        )
        .await?;

    assert_eq!(wrong_password.status, StatusCode::FORBIDDEN);
    assert_eq!(wrong_password.status, unknown_email.status);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "Invalid credentials");
    Ok(())
}

#[tokio::test]
async fn signup_store_failure_is_forbidden() -> Result<()> {
    let app = common::TestApp::new();
    app.store.set_unavailable(true);

    let res = app
        .send(
            "POST",
            "/api/v1/user/signup",
            None,
            Some(json!({ "email": "ada@example.com", "password": "hunter2" })),
        )
        .await?;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "Error while signing up");
    Ok(())
}

#[tokio::test]
async fn oversized_expiry_still_issues_usable_tokens() -> Result<()> {
    for hours in [u64::MAX, 10_000_000_000_000] {
        let mut config = AppConfig::for_tests(common::TEST_SECRET);
        config.security.jwt_expiry_hours = Some(hours);
        let app = common::TestApp::with_config(config);

        let token = app.signup("ada@example.com", "hunter2").await?;

        assert!(auth::verify(&token, common::TEST_SECRET).is_ok());
    }
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn signup_and_signin_on_single_threaded_runtime() -> Result<()> {
    let app = common::TestApp::new();
    app.signup("ada@example.com", "hunter2").await?;

    let res = app
        .send(
            "POST",
            "/api/v1/user/signin",
            None,
            Some(json!({ "email": "ada@example.com", "password": "hunter2" })),
        )
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn signin_store_failure_is_server_error() -> Result<()> {
    let app = common::TestApp::new();
    app.store.set_unavailable(true);

    let res = app
        .send(
            "POST",
            "/api/v1/user/signin",
            None,
            Some(json!({ "email": "ada@example.com", "password": "hunter2" })),
        )
        .await?;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "Error while signing in");
    Ok(())
}
