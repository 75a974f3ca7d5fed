pub mod auth;
pub mod post;
pub mod server;

use crate::cli::client::ApiClient;
use crate::cli::config::EnvironmentConfig;

/// Client for the selected server, carrying the stored token if any.
pub(crate) fn client_for(env: &EnvironmentConfig) -> anyhow::Result<ApiClient> {
    ApiClient::new(env.server_url.clone(), env.token.clone())
}
