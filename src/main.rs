//! es-scroll command line
//!
//! Pings an index, runs a single search, advances a known scroll cursor, or drains a
//! whole result set through scroll cursors, printing JSON to stdout.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use es_scroll::{config::Settings, HttpClient, Page, ScrollClient};
use futures::TryStreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "es-scroll", version, about = "Scroll through search results")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "ES_SCROLL_SETTINGS_PATH")]
    config: Option<PathBuf>,

    /// Log every request
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the index answers
    Ping(Target),
    /// Run the query once and print the page
    Search {
        #[command(flatten)]
        target: Target,
        /// Ask for a scroll cursor
        #[arg(long)]
        scroll: bool,
    },
    /// Advance an existing scroll cursor once and print the page
    Scroll {
        #[command(flatten)]
        target: Target,
        /// Token returned as `_scroll_id` by a previous search or scroll
        #[arg(long)]
        scroll_id: String,
    },
    /// Print every hit, one JSON document per line
    Drain(Target),
}

#[derive(Args)]
struct Target {
    /// Query URL, e.g. http://localhost:9200/companydatabase/_search
    url: Option<String>,

    /// Raw JSON query body
    #[arg(long, conflicts_with = "body_file")]
    body: Option<String>,

    /// File holding the JSON query body
    #[arg(long)]
    body_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(cli.config.as_deref())?;
    let transport = Arc::new(HttpClient::with_settings(&settings.outgoing)?);

    match cli.command {
        Command::Ping(target) => {
            let client = build_client(&target, &settings, transport)?;
            client.ping().await?;
            info!("{} is reachable", client.endpoint());
        }
        Command::Search { target, scroll } => {
            let client = build_client(&target, &settings, transport)?;
            let page = if scroll {
                client.search_with_cursor().await?
            } else {
                client.search().await?
            };
            info!("{} of {} hits", page.len(), page.total);
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Scroll { target, scroll_id } => {
            let client = build_client(&target, &settings, transport)?;
            let previous = Page {
                scroll_id: Some(scroll_id),
                ..Default::default()
            };
            let page = client.advance(&previous).await?;
            info!("{} hits, next cursor: {}", page.len(), page.cursor().unwrap_or("none"));
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Drain(target) => {
            let client = build_client(&target, &settings, transport)?;
            let mut hits = std::pin::pin!(client.hits());
            let mut count = 0usize;
            while let Some(hit) = hits.try_next().await? {
                println!("{}", serde_json::to_string(&hit)?);
                count += 1;
            }
            info!("Drained {} hits from {}", count, client.endpoint());
        }
    }

    Ok(())
}

/// Build a client from command line arguments, falling back to settings
fn build_client(
    target: &Target,
    settings: &Settings,
    transport: Arc<HttpClient>,
) -> Result<ScrollClient> {
    let url = target
        .url
        .as_deref()
        .or(settings.search.url.as_deref())
        .context("No query URL given (argument, search.url or ES_SCROLL_URL)")?;

    let body = match (&target.body, &target.body_file) {
        (Some(body), _) => Some(body.clone()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        (None, None) => settings.search.body().map(|b| b.to_string()),
    };

    Ok(ScrollClient::with_transport(url, body.as_deref(), transport)?)
}

/// Load settings from file or use defaults
fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        info!("Loading settings from: {}", path.display());
        let mut settings = Settings::from_file(path)?;
        settings.merge_env();
        return Ok(settings);
    }

    let paths = [
        PathBuf::from("es-scroll.yml"),
        dirs::config_dir()
            .map(|p| p.join("es-scroll/settings.yml"))
            .unwrap_or_default(),
    ];

    for path in paths.iter() {
        if path.is_file() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
