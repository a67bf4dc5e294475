//! gigbook-web - Main entry point
//!
//! Serves the venue/artist/show booking directory over HTTP.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use gigbook_common::config::{Overrides, ServerConfig, TomlConfig};
use gigbook_common::db::init_database;
use gigbook_common::Store;
use gigbook_web::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for gigbook-web
#[derive(Parser, Debug)]
#[command(name = "gigbook-web")]
#[command(about = "Venue, artist and show booking directory")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "GIGBOOK_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = "GIGBOOK_BIND")]
    bind: Option<String>,

    /// Folder holding gigbook.db
    #[arg(short, long, env = "GIGBOOK_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "GIGBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "GIGBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Also write logs to this file
    #[arg(long, env = "GIGBOOK_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Tracing is not up yet; report a bad config file once it is
    let (file_config, config_error) = match TomlConfig::discover(args.config.as_deref()) {
        Ok(file_config) => (file_config, None),
        Err(e) => (TomlConfig::default(), Some(e)),
    };

    let config = ServerConfig::resolve(
        Overrides {
            root_folder: args.root_folder,
            bind: args.bind,
            port: args.port,
            log_level: args.log_level,
            log_file: args.log_file,
        },
        file_config,
    );

    init_tracing(&config)?;

    if let Some(e) = config_error {
        warn!("Ignoring config file: {}", e);
    }

    info!(
        "Starting gigbook-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Root folder: {}", config.root_folder.display());

    let db_path = config.database_path();
    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let app = build_router(AppState::new(Store::new(pool)));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("gigbook-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("gigbook-web stopped");
    Ok(())
}

fn init_tracing(config: &ServerConfig) -> Result<()> {
    let level = &config.log_level;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "gigbook_web={level},gigbook_common={level},tower_http={level}"
        ))
    });

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        // Keep serving
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
