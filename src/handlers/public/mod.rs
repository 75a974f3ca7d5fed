// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition (signup/signin) and read-only access to posts. Every
// input is untrusted and validated before it reaches the store.
pub mod blog;
pub mod user;

pub use blog::{get_post, list_posts};
pub use user::{signin, signup};
