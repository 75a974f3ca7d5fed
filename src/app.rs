use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::handlers::{protected, public, system};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full HTTP application over `state`.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(user_routes())
        .merge(blog_public_routes())
        // Protected
        .merge(blog_protected_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config));

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/user/signup", post(public::signup))
        .route("/api/v1/user/signin", post(public::signin))
}

fn blog_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/blog/bulk", get(public::list_posts))
        .route("/api/v1/blog/:id", get(public::get_post))
}

fn blog_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/blog",
            post(protected::create_post).put(protected::update_post),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::database::MemoryStore;

    fn test_app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), AppConfig::for_tests("unit-test-secret"));
        (app(state), store)
    }

    #[tokio::test]
    async fn unauthenticated_create_never_touches_store() {
        let (app, store) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/blog")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title":"t","content":"c"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(store.operations(), 0);
    }

    #[tokio::test]
    async fn public_reads_need_no_token() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/blog/bulk")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bulk_is_not_captured_by_id_route() {
        let (app, store) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/blog/bulk?page=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        // list + count
        assert_eq!(store.operations(), 2);
    }
}
