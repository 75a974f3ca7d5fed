use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

/// Thin HTTP client for the blog API.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn signup(&self, email: &str, password: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .post(self.url("/api/v1/user/signup"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        extract_jwt(read_json(response).await?)
    }

    pub async fn signin(&self, email: &str, password: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .post(self.url("/api/v1/user/signin"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        extract_jwt(read_json(response).await?)
    }

    pub async fn create_post(&self, title: &str, content: &str) -> anyhow::Result<Value> {
        let request = self
            .http
            .post(self.url("/api/v1/blog"))
            .json(&json!({ "title": title, "content": content }));
        read_json(self.authorized(request).send().await?).await
    }

    pub async fn update_post(&self, id: &str, title: &str, content: &str) -> anyhow::Result<String> {
        let request = self
            .http
            .put(self.url("/api/v1/blog"))
            .json(&json!({ "id": id, "title": title, "content": content }));
        let response = check_status(self.authorized(request).send().await?).await?;
        Ok(response.text().await?)
    }

    pub async fn list_posts(&self, page: Option<u32>, limit: Option<u32>) -> anyhow::Result<Value> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let response = self
            .http
            .get(self.url("/api/v1/blog/bulk"))
            .query(&query)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn get_post(&self, id: &str) -> anyhow::Result<Value> {
        let response = self
            .http
            .get(self.url(&format!("/api/v1/blog/{}", id)))
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn health(&self) -> anyhow::Result<(bool, Value)> {
        let response = self.http.get(self.url("/health")).send().await?;
        let healthy = response.status().is_success();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok((healthy, body))
    }
}

/// Turn a non-2xx response into an error carrying the API's message.
async fn check_status(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    Err(anyhow::anyhow!("{} ({})", api_error_message(&body), status))
}

async fn read_json(response: Response) -> anyhow::Result<Value> {
    Ok(check_status(response).await?.json::<Value>().await?)
}

fn api_error_message(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .unwrap_or("request failed")
        .to_string()
}

fn extract_jwt(body: Value) -> anyhow::Result<String> {
    body.get("jwt")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Server response did not include a token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_api_error_message() {
        let body = json!({ "error": "Invalid credentials", "code": "INVALID_CREDENTIALS" });
        assert_eq!(api_error_message(&body), "Invalid credentials");
        assert_eq!(api_error_message(&Value::Null), "request failed");
    }

    #[test]
    fn extracts_token() {
        assert_eq!(extract_jwt(json!({ "jwt": "abc" })).unwrap(), "abc");
        assert!(extract_jwt(json!({})).is_err());
    }
}
