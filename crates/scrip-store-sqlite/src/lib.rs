//! SQLite backend for the Scrip record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on dedicated
//! connection threads without blocking the async runtime. Connections are
//! handed out from a small bounded pool, one per operation.

mod encode;
mod pool;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use pool::PoolConfig;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
