//! Command-line client for the infraction registry API.

use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "registry-cli")]
#[command(about = "Client for the speed infraction registry", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all infractions, newest first
    List,
    /// List infractions for one plate
    Find { plate: String },
    /// Record a new infraction
    Add {
        plate: String,
        speed: f64,
        timestamp: String,
    },
    /// Delete an infraction by id
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let request = match cli.command {
        Commands::List => client.get(endpoint(&base, &[])?),
        Commands::Find { plate } => client.get(endpoint(&base, &[plate.as_str()])?),
        Commands::Add {
            plate,
            speed,
            timestamp,
        } => client.post(endpoint(&base, &[])?).json(&json!({
            "plate": plate,
            "speed": speed,
            "timestamp": timestamp,
        })),
        Commands::Delete { id } => client.delete(endpoint(&base, &[id.to_string().as_str()])?),
    };

    let res = request.send().await?;
    print_response(res).await
}

/// `<base>/infractions[/<segment>]`, with segments percent-encoded.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("{base} cannot be used as a base URL"))?
        .pop_if_empty()
        .push("infractions")
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let body = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{body}");
        Ok(())
    } else {
        eprintln!("Error: registry returned status {status}");
        if !body.is_empty() {
            eprintln!("{body}");
        }
        std::process::exit(1);
    }
}
