// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::StoreError;
use crate::validation::Issue;

/// Routes of the blog API, used to pick the status for store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute {
    Signup,
    Signin,
    CreatePost,
    UpdatePost,
    ListPosts,
    GetPost,
}

impl ApiRoute {
    /// Status returned when the data store fails underneath this route.
    ///
    /// Signup has always answered store failures (duplicate email included)
    /// with 403; every other route answers with 500.
    pub fn store_failure_status(self) -> StatusCode {
        match self {
            ApiRoute::Signup => StatusCode::FORBIDDEN,
            ApiRoute::Signin
            | ApiRoute::CreatePost
            | ApiRoute::UpdatePost
            | ApiRoute::ListPosts
            | ApiRoute::GetPost => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message for a store failure on this route.
    pub fn store_failure_message(self) -> &'static str {
        match self {
            ApiRoute::Signup => "Error while signing up",
            ApiRoute::Signin => "Error while signing in",
            ApiRoute::CreatePost => "Failed to create post",
            ApiRoute::UpdatePost => "Failed to update blog",
            ApiRoute::ListPosts => "Failed to fetch posts",
            ApiRoute::GetPost => "Failed to fetch post",
        }
    }
}

/// Why the auth middleware turned a request away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// Token decoded but carried no usable subject.
    NotLoggedIn,
    /// Token failed to decode or verify.
    InvalidToken,
}

impl AuthRejection {
    pub fn message(self) -> &'static str {
        match self {
            AuthRejection::NotLoggedIn => "You are not logged in",
            AuthRejection::InvalidToken => "Invalid or expired token",
        }
    }
}

/// Why a signin attempt failed. Both reasons produce the same response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownEmail,
    PasswordMismatch,
}

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation { message: String, issues: Vec<Issue> },
    InvalidJson(String),

    // 403 Forbidden
    Unauthorized(AuthRejection),
    Credentials(CredentialFailure),

    // 404 Not Found
    NotFound(String),

    // Status decided per route
    Store(ApiRoute),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ApiError::Credentials(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(route) => route.store_failure_status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(reason) => reason.message(),
            ApiError::Credentials(_) => "Invalid credentials",
            ApiError::NotFound(msg) => msg,
            ApiError::Store(route) => route.store_failure_message(),
            ApiError::Internal(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Credentials(_) => "INVALID_CREDENTIALS",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Store(_) => "STORE_ERROR",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.message(),
            "code": self.error_code(),
        });

        if let ApiError::Validation { issues, .. } = self {
            body["issues"] = json!(issues);
        }

        body
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>, issues: Vec<Issue>) -> Self {
        ApiError::Validation {
            message: message.into(),
            issues,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// Log a store failure and hide its detail behind the route's policy.
    pub fn store(route: ApiRoute, err: StoreError) -> Self {
        tracing::error!(route = ?route, error = %err, "data store operation failed");
        ApiError::Store(route)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
