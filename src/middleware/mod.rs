pub mod auth;

pub use auth::{extract_token, jwt_auth_middleware, AuthUser};
