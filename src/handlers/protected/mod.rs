// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Routes in this tier sit behind `jwt_auth_middleware`, which injects
// `AuthUser` into the request extensions before the handler runs.
pub mod blog;

pub use blog::{create_post, update_post};
