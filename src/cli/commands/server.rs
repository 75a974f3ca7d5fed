use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::client_for;
use crate::cli::config::{load_environment_config, normalize_server_url, save_environment_config};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Select the server to talk to (clears the stored token)")]
    Use {
        #[arg(help = "Server URL, e.g. http://localhost:8787")]
        url: String,
    },

    #[command(about = "Show the selected server")]
    Show,

    #[command(about = "Check server health status from the /health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Use { url } => {
            let url = normalize_server_url(&url)?;
            let mut env = load_environment_config()?;
            if env.server_url != url {
                env.clear_session();
            }
            env.server_url = url.clone();
            save_environment_config(&env)?;

            output_success(
                &output_format,
                &format!("Switched to server {}", url),
                Some(json!({ "server_url": url })),
            )
        }
        ServerCommands::Show => {
            let env = load_environment_config()?;
            output_success(
                &output_format,
                &format!("Current server: {}", env.server_url),
                Some(json!({ "server_url": env.server_url })),
            )
        }
        ServerCommands::Health => {
            let env = load_environment_config()?;
            let (healthy, body) = client_for(&env)?.health().await?;
            if !healthy {
                anyhow::bail!("Server {} is degraded: {}", env.server_url, body);
            }

            output_success(
                &output_format,
                &format!("Server {} is healthy", env.server_url),
                Some(json!({ "health": body })),
            )
        }
    }
}
