//! ygo-lookup - command line front end
//!
//! Runs the startup sequence against the remote data service, performs
//! one lookup and prints the result as JSON.
//!
//! Usage:
//!     ygo-lookup search "blue eyes"
//!     ygo-lookup --api-url localhost:5000 archetype Blue-Eyes
//!     ygo-lookup --debug card 89631139

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{error, info};
use ygo_client::config::normalize_api_url;
use ygo_client::{CardService, ClientConfig};

#[derive(Parser, Debug)]
#[command(name = "ygo-lookup")]
#[command(about = "Find cards, archetypes and sets by fuzzy name")]
#[command(version)]
struct Args {
    /// Remote data service URL (overrides API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Disable the response cache
    #[arg(long)]
    debug: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fuzzy search card, archetype and set names
    Search { term: String },
    /// Show a card by id or name
    Card { key: String },
    /// Show an archetype with its member, support and related cards
    Archetype { key: String },
    /// Show a set with its cards
    Set { key: String },
    /// List every known name
    Names,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    ygo_client::tracing::init_with_filter(&args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.api_url {
        config.api_url = normalize_api_url(&url);
    }
    if args.debug {
        config.cache_enabled = false;
    }

    info!("ygo-lookup {}", env!("CARGO_PKG_VERSION"));
    let service = CardService::startup(&config).await?;

    let output = match args.command {
        Command::Search { term } => serde_json::to_value(service.search(&term))?,
        Command::Card { key } => serde_json::to_value(service.get_card(&key).await?)?,
        Command::Archetype { key } => {
            let (archetype, group) = service.get_archetype(&key).await?;
            json!({
                "archetype": archetype,
                "members": group.members,
                "support": group.support,
                "related": group.related,
            })
        }
        Command::Set { key } => {
            let (set, contents) = service.get_set(&key).await?;
            json!({ "set": set, "contents": contents })
        }
        Command::Names => serde_json::to_value(service.names())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
