pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "blog")]
#[command(about = "Blog CLI - Command-line client for the Blog API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Select and check the API server")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Signup, signin and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Create, update and read posts")]
    Post {
        #[command(subcommand)]
        cmd: commands::post::PostCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Post { cmd } => commands::post::handle(cmd, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_post_update() {
        let cli = Cli::try_parse_from([
            "blog", "--json", "post", "update", "abc", "--title", "t", "--content", "c",
        ])
        .unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        assert!(matches!(
            cli.command,
            Commands::Post {
                cmd: commands::post::PostCommands::Update { .. }
            }
        ));
    }

    #[test]
    fn defaults_to_text_output() {
        let cli = Cli::try_parse_from(["blog", "server", "show"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Text));
    }

    #[tokio::test]
    async fn errors_are_returned_for_the_caller_to_render() {
        let cli = Cli::try_parse_from(["blog", "--json", "server", "use", "ftp://example.com"]).unwrap();
        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported URL scheme"));
    }
}
