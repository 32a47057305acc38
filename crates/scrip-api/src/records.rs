//! Handlers for the prescription-record endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `POST`   | `/submit`      | Body: [`RecordForm`]; plain-text ack, or the stored record with `Prefer: return=representation` |
//! | `GET`    | `/data`        | All records, ascending id |
//! | `GET`    | `/data/{id}`   | One record; 404 if not found |
//! | `PUT`    | `/update/{id}` | Full replacement; 404 if not found |
//! | `PATCH`  | `/update/{id}` | Merge-patch; 404 if not found |
//! | `DELETE` | `/delete/{id}` | Hard delete; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::HeaderMap,
  response::{IntoResponse, Response},
};
use scrip_core::{
  form::RecordForm,
  record::{PrescriptionRecord, RecordId},
  store::RecordStore,
};

use crate::error::{ApiError, Operation};

pub const SUBMITTED: &str = "Form data submitted successfully!";
pub const UPDATED: &str = "Form data updated successfully!";
pub const DELETED: &str = "Form data deleted successfully";

/// Whether the client sent `Prefer: return=representation` (RFC 7240) to get
/// the stored record back instead of the plain-text ack. `Accept` is not
/// consulted: browser clients list `application/json` there by default.
fn wants_representation(headers: &HeaderMap) -> bool {
  headers
    .get_all("prefer")
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(','))
    .any(|pref| pref.trim().eq_ignore_ascii_case("return=representation"))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /submit`
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  headers: HeaderMap,
  body: Result<Json<RecordForm>, JsonRejection>,
) -> Result<Response, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(form) = body?;
  let input = form.validate()?;

  let record = store
    .create(input)
    .await
    .map_err(ApiError::storage(Operation::Store))?;
  tracing::info!(id = %record.id, "form data submitted");

  if wants_representation(&headers) {
    Ok(Json(record).into_response())
  } else {
    Ok(SUBMITTED.into_response())
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /data`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<PrescriptionRecord>>, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = store
    .list()
    .await
    .map_err(ApiError::storage(Operation::Retrieve))?;
  Ok(Json(records))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /data/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<Json<PrescriptionRecord>, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = store
    .get(id)
    .await
    .map_err(ApiError::storage(Operation::Retrieve))?
    .ok_or(ApiError::NotFound(id))?;
  Ok(Json(record))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /update/{id}` — the body must carry every required field; optional
/// fields left out are cleared.
pub async fn replace<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
  body: Result<Json<RecordForm>, JsonRejection>,
) -> Result<&'static str, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(form) = body?;
  let input = form.validate()?;

  store
    .update(id, input)
    .await
    .map_err(ApiError::storage(Operation::Update))?
    .ok_or(ApiError::NotFound(id))?;
  tracing::info!(%id, "form data updated");
  Ok(UPDATED)
}

/// `PATCH /update/{id}` — fields absent or `null` in the body keep their
/// stored values; the merged record is validated like a new submission.
pub async fn patch<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
  body: Result<Json<RecordForm>, JsonRejection>,
) -> Result<&'static str, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(form) = body?;

  let existing = store
    .get(id)
    .await
    .map_err(ApiError::storage(Operation::Update))?
    .ok_or(ApiError::NotFound(id))?;
  let input = form.merged_over(&existing).validate()?;

  // The record may have been deleted since it was read.
  store
    .update(id, input)
    .await
    .map_err(ApiError::storage(Operation::Update))?
    .ok_or(ApiError::NotFound(id))?;
  tracing::info!(%id, "form data patched");
  Ok(UPDATED)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /delete/{id}`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<RecordId>,
) -> Result<&'static str, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = store
    .delete(id)
    .await
    .map_err(ApiError::storage(Operation::Delete))?;
  if !deleted {
    return Err(ApiError::NotFound(id));
  }
  tracing::info!(%id, "form data deleted");
  Ok(DELETED)
}
