//! Error types for `scrip-core`.

use thiserror::Error;

/// A submitted form that cannot become a record.
///
/// Raised before any storage call; a validation failure never writes a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// Required fields that were absent, `null`, or blank. Names are the wire
  /// names, in form order.
  #[error("Missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("Invalid date: {0:?}")]
  InvalidDate(String),
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
