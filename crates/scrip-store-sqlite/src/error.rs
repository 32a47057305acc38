//! Error type for `scrip-store-sqlite`.
//!
//! Every variant is a storage failure from the service's point of view;
//! missing records are reported through return values instead.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// No pooled connection became free within the configured timeout.
  #[error("no database connection available after {0:?}")]
  PoolExhausted(Duration),

  /// A statement did not complete within the configured timeout.
  #[error("database call timed out after {0:?}")]
  Timeout(Duration),

  #[error("invalid pool size: {0}")]
  InvalidPoolSize(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
