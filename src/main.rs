//! News relay
//!
//! Relays `/all-news`, `/top-headlines`, and `/country/{iso}` to the
//! upstream news API.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ query (normalize) ──▶ upstream::executor ──▶ News API
//!                      CORS, req ID,                          credential appended
//!                      tracing                                 one GET, no retry
//!     Client Response                                               │
//!     ◀────────────── http::response ◀── ResponseEnvelope ◀─────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use news_relay::config::{load_config, load_dotenv, EnvOverrides};
use news_relay::lifecycle::startup;
use news_relay::observability::logging;

#[derive(Parser)]
#[command(name = "news-relay")]
#[command(about = "HTTP relay for the news API", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port; overrides PORT and the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let dotenv_path = load_dotenv();

    let mut config = match load_config(cli.config.as_deref(), &EnvOverrides::from_env()) {
        Ok(config) => config,
        Err(e) if e.is_missing_api_key() => {
            eprintln!(
                "Error: API_KEY is not defined. Please set it in the environment or a .env file and restart the server."
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init(&config.observability)?;

    tracing::info!("news-relay v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &dotenv_path {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
