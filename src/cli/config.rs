use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8787";

/// Persisted CLI state: which server to talk to and the current token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub server_url: String,
    pub token: Option<String>,
    pub email: Option<String>,
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            token: None,
            email: None,
            signed_in_at: None,
        }
    }
}

impl EnvironmentConfig {
    pub fn set_session(&mut self, email: String, token: String) {
        self.email = Some(email);
        self.token = Some(token);
        self.signed_in_at = Some(Utc::now());
    }

    pub fn clear_session(&mut self) {
        self.email = None;
        self.token = None;
        self.signed_in_at = None;
    }

    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not signed in. Run 'blog auth signin <email>' first"))
    }
}

/// Normalize a server URL: must be http(s), trailing slash dropped.
pub fn normalize_server_url(raw: &str) -> anyhow::Result<String> {
    let parsed = url::Url::parse(raw).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", raw, e))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("Unsupported URL scheme '{}'", other),
    }
    if parsed.host_str().is_none() {
        anyhow::bail!("Server URL '{}' has no host", raw);
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("BLOG_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("blog").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_environment_config() -> anyhow::Result<EnvironmentConfig> {
    let config_dir = get_config_dir()?;
    let env_file = config_dir.join("env.json");

    if !env_file.exists() {
        return Ok(EnvironmentConfig::default());
    }

    let content = fs::read_to_string(env_file)?;
    let config: EnvironmentConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_environment_config(config: &EnvironmentConfig) -> anyhow::Result<()> {
    let config_dir = get_config_dir()?;
    let env_file = config_dir.join("env.json");

    let content = serde_json::to_string_pretty(config)?;
    fs::write(env_file, content)?;
    Ok(())
}
