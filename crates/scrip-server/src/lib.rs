//! HTTP server wiring for Scrip.
//!
//! Wraps the [`scrip_api`] router with request tracing and CORS, and defines
//! the [`ServerConfig`] read by the `scrip-server` binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::Router;
use scrip_core::store::RecordStore;
use scrip_store_sqlite::PoolConfig;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SCRIP_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub store_path:         PathBuf,
  /// Number of pooled SQLite connections.
  pub pool_size:          usize,
  /// Bound on waiting for a connection and on each database call.
  pub storage_timeout_ms: u64,
}

impl ServerConfig {
  /// Layer defaults, the TOML file at `path` (if it exists), and the
  /// environment, in increasing priority.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000_i64)?
      .set_default("store_path", "scrip.db")?
      .set_default("pool_size", 10_i64)?
      .set_default("storage_timeout_ms", 5000_i64)?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("SCRIP"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn pool_config(&self) -> PoolConfig {
    PoolConfig {
      size:    self.pool_size,
      timeout: Duration::from_millis(self.storage_timeout_ms),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: the record API plus tracing and CORS layers.
///
/// CORS allows any origin; the web form is served from elsewhere.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: RecordStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  scrip_api::api_router(store)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use scrip_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  #[test]
  fn missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.store_path, PathBuf::from("scrip.db"));
    assert_eq!(cfg.pool_config(), PoolConfig {
      size:    10,
      timeout: Duration::from_secs(5),
    });
  }

  #[test]
  fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
      &path,
      "host = \"0.0.0.0\"\nport = 8080\npool_size = 2\nstorage_timeout_ms = 250\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:8080");
    assert_eq!(cfg.pool_config().size, 2);
    assert_eq!(cfg.pool_config().timeout, Duration::from_millis(250));
  }

  #[test]
  fn expand_tilde_leaves_plain_paths_alone() {
    assert_eq!(expand_tilde(Path::new("data/scrip.db")), PathBuf::from("data/scrip.db"));
  }

  #[tokio::test]
  async fn cross_origin_requests_are_allowed() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let req = Request::builder()
      .uri("/data")
      .header(header::ORIGIN, "http://localhost:5173")
      .body(Body::empty())
      .unwrap();

    let resp = router(Arc::new(store)).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  #[tokio::test]
  async fn preflight_is_answered() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/update/1")
      .header(header::ORIGIN, "http://localhost:5173")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
      .body(Body::empty())
      .unwrap();

    let resp = router(Arc::new(store)).oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
  }
}
