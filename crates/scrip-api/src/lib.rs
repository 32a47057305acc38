//! JSON/plain-text REST API for Scrip — the Record Service.
//!
//! Exposes an axum [`Router`] backed by any [`scrip_core::store::RecordStore`].
//! Transport concerns (CORS, tracing, listeners) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = scrip_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod records;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use scrip_core::store::RecordStore;

pub use error::{ApiError, Operation};

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/submit", post(records::submit::<S>))
    .route("/data", get(records::list::<S>))
    .route("/data/{id}", get(records::get_one::<S>))
    .route(
      "/update/{id}",
      put(records::replace::<S>).patch(records::patch::<S>),
    )
    .route("/delete/{id}", delete(records::remove::<S>))
    .with_state(store)
}
