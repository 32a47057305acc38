//! scrip-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus `SCRIP_*`
//! environment variables, opens the SQLite store, and serves the record API
//! over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use scrip_server::{ServerConfig, expand_tilde};
use scrip_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Scrip prescription-form record server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open_with(&store_path, server_cfg.pool_config())
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(
    path = %store_path.display(),
    pool_size = server_cfg.pool_size,
    "connected to the database"
  );

  let app = scrip_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
