use clap::Subcommand;
use serde_json::json;

use crate::cli::commands::client_for;
use crate::cli::config::{load_environment_config, save_environment_config};
use crate::cli::utils::{output_success, value_or_stdin};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Create an account and store its token")]
    Signup {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Sign in and store the token")]
    Signin {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (read from stdin if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut env = load_environment_config()?;

    match cmd {
        AuthCommands::Signup { email, password } => {
            let password = value_or_stdin(password, "password")?;
            let token = client_for(&env)?.signup(&email, &password).await?;
            env.set_session(email.clone(), token);
            save_environment_config(&env)?;

            output_success(
                &output_format,
                &format!("Signed up as {}", email),
                Some(json!({ "email": email })),
            )
        }
        AuthCommands::Signin { email, password } => {
            let password = value_or_stdin(password, "password")?;
            let token = client_for(&env)?.signin(&email, &password).await?;
            env.set_session(email.clone(), token);
            save_environment_config(&env)?;

            output_success(
                &output_format,
                &format!("Signed in as {}", email),
                Some(json!({ "email": email })),
            )
        }
        AuthCommands::Logout => {
            env.clear_session();
            save_environment_config(&env)?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => match (&env.email, &env.token) {
            (Some(email), Some(_)) => output_success(
                &output_format,
                &format!("Signed in as {} on {}", email, env.server_url),
                Some(json!({
                    "authenticated": true,
                    "email": email,
                    "server_url": env.server_url,
                    "signed_in_at": env.signed_in_at,
                })),
            ),
            _ => output_success(
                &output_format,
                &format!("Not signed in on {}", env.server_url),
                Some(json!({ "authenticated": false, "server_url": env.server_url })),
            ),
        },
    }
}
