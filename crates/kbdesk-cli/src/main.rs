use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kbdesk_core::{AppConfig, HttpApiClient};

mod commands;

#[derive(Parser)]
#[command(name = "kbdesk")]
#[command(author, version, about = "A terminal console for a knowledge base chat bot")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/kbdesk/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL, e.g. http://localhost:8000/v1
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the API key sent as X-API-Key
    #[arg(long, global = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI (default)
    Run,
    /// Ask the chat bot a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List articles in the knowledge base
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Filter articles by search term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add an article by URL
    Add {
        /// Article URL to scrape and ingest
        url: String,
    },
    /// Delete an article by id
    Delete {
        /// Article id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Check the service health
    Health,
    /// Find articles similar to a piece of text
    Similar {
        /// Text to compare against
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Maximum number of results
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
        /// Minimum similarity score
        #[arg(short, long, default_value_t = 0.7)]
        threshold: f64,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load config")?,
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(api_key) = cli.api_key {
        config.api.api_key = api_key;
    }
    let config = Arc::new(config);

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    if let Some(Commands::Config { init }) = cli.command {
        return commands::config::run(&config, init);
    }

    let client = HttpApiClient::new(&config).context("Failed to create API client")?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, Arc::new(client)).await,
        Some(Commands::Ask { query }) => commands::ask::run(&client, &query.join(" ")).await,
        Some(Commands::List { page, search }) => {
            commands::list::run(&client, &config, page, search.as_deref()).await
        }
        Some(Commands::Add { url }) => commands::add::run(&client, &url).await,
        Some(Commands::Delete { id, yes }) => commands::delete::run(&client, &id, yes).await,
        Some(Commands::Health) => commands::health::run(&client).await,
        Some(Commands::Similar {
            text,
            limit,
            threshold,
        }) => commands::similar::run(&client, &text.join(" "), limit, threshold).await,
        Some(Commands::Config { .. }) => Ok(()),
    }
}

/// Log to stderr for one-shot commands; the TUI owns the terminal, so it
/// logs to a file under the data directory instead.
fn init_logging(config: &AppConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if interactive {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())
            .context("Failed to open log file")?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
