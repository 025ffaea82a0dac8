//! medadmin-review - read-only review service for admin record datasets
//!
//! Loads experiment designs and activity log entries from a JSON fixtures
//! file and serves them through the shared multi-criteria filters.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use medadmin_common::config::{
    load_config, resolve_fixtures_path, ConfigSource, ENV_CONFIG_PATH, ENV_FIXTURES_PATH,
};
use medadmin_common::records::RecordSet;
use medadmin_review::{build_router, AppState};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "medadmin-review", version, about = "Read-only review service for admin datasets")]
struct Args {
    /// Path to the TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the JSON fixtures file
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// HTTP port (overrides config)
    #[arg(long, env = "MEDADMIN_PORT")]
    port: Option<u16>,

    /// Actor assumed when requests carry no identity header
    #[arg(long)]
    actor: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so its log level applies; the outcome
    // is reported once the subscriber is installed.
    let loaded = load_config(args.config.as_deref(), ENV_CONFIG_PATH);
    let level = loaded
        .as_ref()
        .map(|(c, _)| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .init();

    info!(
        "Starting medadmin-review v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = match loaded {
        Ok((config, ConfigSource::File(path))) => {
            info!("Loaded configuration from {}", path.display());
            config
        }
        Ok((config, ConfigSource::Missing(path))) => {
            warn!("Config file {} not found; using built-in defaults", path.display());
            config
        }
        Ok((config, ConfigSource::Defaults)) => {
            info!("No config file found; using built-in defaults");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let fixtures_path = resolve_fixtures_path(args.fixtures.as_deref(), ENV_FIXTURES_PATH, &config);
    info!("Fixtures path: {}", fixtures_path.display());

    let records = match RecordSet::load_or_empty(&fixtures_path) {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to load fixtures: {}", e);
            return Err(e.into());
        }
    };

    let default_actor = args.actor.or(config.default_actor.clone());
    match &default_actor {
        Some(actor) => info!("Default actor: {}", actor),
        None => info!("No default actor; 'created by me' filters need the x-medadmin-actor header"),
    }

    let state = AppState::new(records, default_actor, config.page_size);
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr = format!("{}:{}", config.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("medadmin-review listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
