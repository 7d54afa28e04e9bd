//! UptimeRobot monitor command line tool

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uptimerobot_api::codes::ALL_CODECS;
use uptimerobot_api::{Config, HttpTransport, Result, UptimeRobotClient};

#[derive(Parser, Debug)]
#[command(name = "uptimerobot", version, about = "Inspect and manage UptimeRobot monitors")]
struct Cli {
    /// Override the API base URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a monitor as JSON
    Get { id: i64 },
    /// Delete a monitor
    Delete { id: i64 },
    /// List the names accepted for every enumerated field
    Codes,
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Codes => {
            for line in codes_listing() {
                println!("{}", line);
            }
        }
        Command::Get { id } => {
            let client = connect(cli.api_url)?;
            let monitor = client.get_monitor(id).await?;
            println!("{}", serde_json::to_string_pretty(&monitor)?);
        }
        Command::Delete { id } => {
            let client = connect(cli.api_url)?;
            client.delete_monitor(id).await?;
            info!("Deleted monitor {}", id);
        }
    }

    Ok(())
}

/// One line per enumeration with its accepted names
fn codes_listing() -> Vec<String> {
    ALL_CODECS
        .iter()
        .map(|codec| format!("{}: {}", codec.kind(), codec.names().join(", ")))
        .collect()
}

/// Build a client from the environment, exiting on invalid configuration
fn connect(api_url: Option<String>) -> Result<UptimeRobotClient<HttpTransport>> {
    let mut config = Config::from_env();
    if let Some(api_url) = api_url {
        config.api_url = api_url;
    }

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    info!("Using UptimeRobot API at {}", config.api_url);
    UptimeRobotClient::from_config(&config)
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
