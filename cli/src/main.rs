use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use palace::Palace;
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("no palace yet; run `create --topic <topic>` first")]
    NoPalace,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mind-palace-cli", about = "Mind palace API CLI")]
struct Cli {
    #[arg(long, env = "PALACE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    /// Print the stored palace.
    Show {
        #[arg(long, default_value_t = false, help = "Print raw JSON instead of a summary")]
        json: bool,
    },
    /// Start a new, empty palace (replaces any stored one).
    Create {
        #[arg(long)]
        topic: String,
    },
    /// Rename the stored palace.
    Topic {
        text: String,
    },
    /// Generate one room and append it to the stored palace.
    Generate {
        #[arg(long, default_value = "claude", help = "claude or openai")]
        provider: String,
    },
    /// Set the memory note on an object.
    Memory {
        room_id: String,
        object_id: String,
        text: String,
    },
    Layout,
    /// Report what sits under a canvas point.
    Hit {
        x: f64,
        y: f64,
    },
    Svg {
        #[arg(long)]
        selected: Option<String>,
        #[arg(long, help = "Output file; stdout when omitted")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    client: reqwest::Client,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, client: reqwest::Client::new() };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Show { json } => run_show(&ctx, json).await,
        Command::Create { topic } => {
            let body = serde_json::to_value(Palace::new(topic))?;
            let out = api_request(&ctx, reqwest::Method::POST, "/api/palace", Some(body)).await?;
            print_json(&out)
        }
        Command::Topic { text } => {
            let palace = api_request(&ctx, reqwest::Method::PUT, "/api/palace/topic", Some(json!({ "topic": text }))).await?;
            let palace: Palace = serde_json::from_value(palace)?;
            print!("{}", summarize(&palace));
            Ok(())
        }
        Command::Generate { provider } => {
            let body = json!({ "provider": provider });
            let room = api_request(&ctx, reqwest::Method::POST, "/api/palace/rooms", Some(body)).await?;
            print_json(&room)
        }
        Command::Memory { room_id, object_id, text } => {
            let path = format!("/api/palace/rooms/{room_id}/objects/{object_id}/memory");
            let object = api_request(&ctx, reqwest::Method::PUT, &path, Some(json!({ "memory": text }))).await?;
            print_json(&object)
        }
        Command::Layout => {
            let layout = api_request(&ctx, reqwest::Method::GET, "/api/palace/layout", None).await?;
            print_json(&layout)
        }
        Command::Hit { x, y } => {
            let hit = api_request(&ctx, reqwest::Method::POST, "/api/palace/hit", Some(json!({ "x": x, "y": y }))).await?;
            print_json(&hit)
        }
        Command::Svg { selected, out } => run_svg(&ctx, selected, out).await,
    }
}

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let response = ctx.client.get(url(&ctx.base_url, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_show(ctx: &CliContext, raw: bool) -> Result<(), CliError> {
    let value = api_request(ctx, reqwest::Method::GET, "/api/palace", None).await?;
    if raw {
        return print_json(&value);
    }
    if value.as_object().is_some_and(serde_json::Map::is_empty) {
        return Err(CliError::NoPalace);
    }
    let palace: Palace = serde_json::from_value(value)?;
    print!("{}", summarize(&palace));
    Ok(())
}

async fn run_svg(ctx: &CliContext, selected: Option<String>, out: Option<PathBuf>) -> Result<(), CliError> {
    let mut request = ctx.client.get(url(&ctx.base_url, "/api/palace/svg"));
    if let Some(selected) = &selected {
        request = request.query(&[("selected", selected)]);
    }
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&body) });
    }

    match out {
        Some(path) => {
            tokio::fs::write(&path, body).await?;
            println!("wrote {}", path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

async fn api_request(
    ctx: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let request = ctx.client.request(method, url(&ctx.base_url, path));
    let request = if let Some(json) = body { request.json(&json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&text) });
    }

    Ok(serde_json::from_str(&text)?)
}

fn url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// The `error` field of a JSON error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}

/// One line per room, indented lines per object; `*` marks a stored memory.
fn summarize(palace: &Palace) -> String {
    let mut out = format!("{} ({} rooms)\n", palace.topic, palace.rooms.len());
    for room in &palace.rooms {
        let _ = writeln!(
            out,
            "[{},{}] {}  {}",
            room.grid_position.x, room.grid_position.y, room.name, room.id
        );
        for obj in &room.objects {
            let mark = if obj.has_memory() { '*' } else { '-' };
            let _ = writeln!(out, "    {mark} {}  {}", obj.name, obj.id);
            if obj.has_memory() {
                let _ = writeln!(out, "        {}", obj.memory);
            }
        }
    }
    out
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
