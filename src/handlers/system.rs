use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Blog API (Rust)",
        "version": version,
        "description": "Minimal blogging backend built with Rust (Axum)",
        "endpoints": {
            "signup": "POST /api/v1/user/signup (public)",
            "signin": "POST /api/v1/user/signin (public)",
            "create": "POST /api/v1/blog (bearer token)",
            "update": "PUT /api/v1/blog (bearer token)",
            "bulk": "GET /api/v1/blog/bulk?page=&limit= (public)",
            "show": "GET /api/v1/blog/:id (public)",
            "health": "GET /health (public)",
        }
    }))
}

/// GET /health - liveness plus a data store ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
