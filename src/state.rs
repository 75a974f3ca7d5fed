use std::sync::Arc;

use crate::config::{AppConfig, MAX_JWT_EXPIRY_HOURS};
use crate::database::BlogStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn BlogStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.security.jwt_secret
    }

    /// Lifetime of newly issued tokens; `None` issues tokens without expiry.
    ///
    /// Hours are capped at [`MAX_JWT_EXPIRY_HOURS`] even when the config was
    /// built by hand rather than parsed from the environment.
    pub fn token_ttl(&self) -> Option<chrono::Duration> {
        let hours = self.config.security.jwt_expiry_hours?.min(MAX_JWT_EXPIRY_HOURS);
        i64::try_from(hours).ok().and_then(chrono::Duration::try_hours)
    }
}
