//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `scrip-store-sqlite`).
//! Higher layers (`scrip-api`, `scrip-server`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::record::{NewRecord, PrescriptionRecord, RecordId};

/// Abstraction over a prescription-record store backend.
///
/// Every operation touches at most one record. Absence is reported through
/// the return value (`None` / `false`), never through `Self::Error`, so
/// callers can tell "not found" apart from a backend failure.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record and return it with its freshly assigned id.
  fn create(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<PrescriptionRecord, Self::Error>> + Send + '_;

  /// All current records in ascending id order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<PrescriptionRecord>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Option<PrescriptionRecord>, Self::Error>> + Send + '_;

  /// Overwrite every field of an existing record; the id is kept.
  ///
  /// Returns the updated record, or `None` (with nothing written) if `id`
  /// does not exist.
  fn update(
    &self,
    id: RecordId,
    input: NewRecord,
  ) -> impl Future<Output = Result<Option<PrescriptionRecord>, Self::Error>> + Send + '_;

  /// Permanently remove a record. Returns `false` if `id` does not exist.
  fn delete(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
