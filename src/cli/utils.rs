use std::io::Read;

use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Print a post in the appropriate format
pub fn output_post(output_format: &OutputFormat, post: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(post)?),
        OutputFormat::Text => {
            println!("{}", field(post, "title"));
            println!("id: {}  author: {}", field(post, "id"), field(post, "authorId"));
            println!();
            println!("{}", field(post, "content"));
        }
    }
    Ok(())
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Use `provided` if given, otherwise read all of stdin.
pub fn value_or_stdin(provided: Option<String>, what: &str) -> anyhow::Result<String> {
    if let Some(value) = provided {
        return Ok(value);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let value = buffer.trim_end_matches(&['\r', '\n'][..]).to_string();

    if value.is_empty() {
        anyhow::bail!("No {} provided (pass it as an option or pipe it on stdin)", what);
    }
    Ok(value)
}
