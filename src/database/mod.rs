pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use models::{Post, User};
pub use postgres::PgStore;
pub use store::{BlogStore, StoreError};
