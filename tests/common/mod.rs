#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use blog_api_rust::config::AppConfig;
use blog_api_rust::database::MemoryStore;
use blog_api_rust::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// The full router over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::for_tests(TEST_SECRET))
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = app(AppState::new(store.clone(), config));
        Self { router, store }
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let text = String::from_utf8(bytes.to_vec()).context("response body is not UTF-8")?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok(TestResponse { status, body, text })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.send("GET", uri, None, None).await
    }

    /// Sign up `email` and return the issued token.
    pub async fn signup(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .send(
                "POST",
                "/api/v1/user/signup",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "signup failed: {} {}", res.status, res.text);
        jwt_of(&res)
    }

    /// Create a post as the holder of `token` and return its id.
    pub async fn create_post(&self, token: &str, title: &str, content: &str) -> Result<String> {
        let res = self
            .send(
                "POST",
                "/api/v1/blog",
                Some(token),
                Some(json!({ "title": title, "content": content })),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "create failed: {} {}", res.status, res.text);
        res.body["id"]
            .as_str()
            .map(str::to_string)
            .context("create response has no id")
    }
}

pub fn jwt_of(res: &TestResponse) -> Result<String> {
    res.body["jwt"]
        .as_str()
        .map(str::to_string)
        .context("response has no jwt")
}
