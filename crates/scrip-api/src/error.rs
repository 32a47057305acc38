//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure becomes a `text/plain` response. Storage failures are logged
//! here and answered with a fixed per-operation message; the cause is never
//! sent to the client.

use std::fmt;

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use scrip_core::{ValidationError, record::RecordId};
use thiserror::Error;

/// The storage operation a handler was performing when the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Store,
  Retrieve,
  Update,
  Delete,
}

impl Operation {
  /// Response body sent for a storage failure.
  pub fn failure_message(self) -> &'static str {
    match self {
      Operation::Store => "Error storing data",
      Operation::Retrieve => "Error retrieving data",
      Operation::Update => "Error updating data",
      Operation::Delete => "Error deleting data",
    }
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Operation::Store => "storing data",
      Operation::Retrieve => "retrieving data",
      Operation::Update => "updating data",
      Operation::Delete => "deleting data",
    })
  }
}

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The body was not a JSON object of strings.
  #[error("malformed request body: {0}")]
  MalformedBody(String),

  #[error("Record {0} not found")]
  NotFound(RecordId),

  #[error("store error while {op}: {source}")]
  Storage {
    op:     Operation,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Adapter for `map_err` on store results.
  pub fn storage<E>(op: Operation) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| ApiError::Storage { op, source: Box::new(e) }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::MalformedBody(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(e) => {
        (StatusCode::BAD_REQUEST, e.to_string()).into_response()
      }
      ApiError::MalformedBody(msg) => {
        (StatusCode::BAD_REQUEST, msg).into_response()
      }
      e @ ApiError::NotFound(_) => {
        (StatusCode::NOT_FOUND, e.to_string()).into_response()
      }
      ApiError::Storage { op, source } => {
        tracing::error!(error = %source, "store error while {op}");
        (StatusCode::INTERNAL_SERVER_ERROR, op.failure_message())
          .into_response()
      }
    }
  }
}
