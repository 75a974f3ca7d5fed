use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::commands::client_for;
use crate::cli::config::load_environment_config;
use crate::cli::utils::{output_post, output_success, value_or_stdin};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum PostCommands {
    #[command(about = "Create a post")]
    Create {
        #[arg(long, help = "Post title")]
        title: String,
        #[arg(long, help = "Post content (read from stdin if not provided)")]
        content: Option<String>,
    },

    #[command(about = "Update a post you authored")]
    Update {
        #[arg(help = "Post id")]
        id: String,
        #[arg(long, help = "New title")]
        title: String,
        #[arg(long, help = "New content (read from stdin if not provided)")]
        content: Option<String>,
    },

    #[command(about = "List posts one page at a time")]
    List {
        #[arg(long, help = "Page number (1-based)")]
        page: Option<u32>,
        #[arg(long, help = "Posts per page")]
        limit: Option<u32>,
    },

    #[command(about = "Show a single post")]
    Show {
        #[arg(help = "Post id")]
        id: String,
    },
}

pub async fn handle(cmd: PostCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let env = load_environment_config()?;
    let client = client_for(&env)?;

    match cmd {
        PostCommands::Create { title, content } => {
            env.require_token()?;
            let content = value_or_stdin(content, "content")?;
            let created = client.create_post(&title, &content).await?;
            let id = created.get("id").and_then(Value::as_str).unwrap_or_default();

            output_success(
                &output_format,
                &format!("Created post {}", id),
                Some(json!({ "id": id })),
            )
        }
        PostCommands::Update { id, title, content } => {
            env.require_token()?;
            let content = value_or_stdin(content, "content")?;
            let message = client.update_post(&id, &title, &content).await?;
            output_success(&output_format, &message, Some(json!({ "id": id })))
        }
        PostCommands::List { page, limit } => {
            let body = client.list_posts(page, limit).await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
                OutputFormat::Text => print_post_page(&body),
            }
            Ok(())
        }
        PostCommands::Show { id } => {
            let body = client.get_post(&id).await?;
            output_post(&output_format, body.get("post").unwrap_or(&Value::Null))
        }
    }
}

fn print_post_page(body: &Value) {
    let empty = Vec::new();
    let posts = body.get("data").and_then(Value::as_array).unwrap_or(&empty);
    let meta = body.get("meta").cloned().unwrap_or(Value::Null);

    if posts.is_empty() {
        println!("No posts found");
    }
    for post in posts {
        println!(
            "{}  {}",
            post.get("id").and_then(Value::as_str).unwrap_or(""),
            post.get("title").and_then(Value::as_str).unwrap_or("")
        );
    }
    println!(
        "page {} of {} ({} posts)",
        meta.get("currentPage").and_then(Value::as_i64).unwrap_or(1),
        meta.get("totalPages").and_then(Value::as_i64).unwrap_or(0),
        meta.get("totalPosts").and_then(Value::as_i64).unwrap_or(0)
    );
}
