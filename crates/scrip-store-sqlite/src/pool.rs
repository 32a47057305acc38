//! A bounded pool of [`tokio_rusqlite::Connection`]s.
//!
//! Each store operation checks out one connection and gives it back when the
//! returned guard drops, whatever the outcome. A semaphore holds one permit
//! per idle connection, so a checkout that finds a permit always finds a
//! connection.

use std::{
  sync::{Arc, Mutex, MutexGuard, PoisonError},
  time::Duration,
};

use rusqlite::InterruptHandle;
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio_rusqlite::Connection;

use crate::{Error, Result};

/// Sizing and timeout settings for [`crate::SqliteStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
  /// Number of connections opened up front. Must be at least 1.
  pub size:    usize,
  /// Upper bound for waiting on a free connection, and separately for each
  /// database call. Also used as SQLite's busy timeout.
  pub timeout: Duration,
}

impl Default for PoolConfig {
  fn default() -> Self {
    Self {
      size:    10,
      timeout: Duration::from_secs(5),
    }
  }
}

/// An open connection and the handle that can cancel its running statement.
#[derive(Clone)]
pub(crate) struct Slot {
  conn:      Connection,
  interrupt: Arc<InterruptHandle>,
}

impl Slot {
  pub async fn new(conn: Connection) -> Result<Self> {
    let interrupt = conn.call(|c| Ok(c.get_interrupt_handle())).await?;
    Ok(Self { conn, interrupt: Arc::new(interrupt) })
  }
}

pub(crate) struct Pool {
  idle:    Mutex<Vec<Slot>>,
  permits: Semaphore,
  timeout: Duration,
}

impl Pool {
  pub fn new(slots: Vec<Slot>, timeout: Duration) -> Self {
    Self {
      permits: Semaphore::new(slots.len()),
      idle: Mutex::new(slots),
      timeout,
    }
  }

  fn idle(&self) -> MutexGuard<'_, Vec<Slot>> {
    // The guarded Vec is only pushed to and popped from; a panic elsewhere
    // cannot leave it half-updated.
    self.idle.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Wait (up to the pool timeout) for a free connection.
  pub async fn acquire(&self) -> Result<PooledConnection<'_>> {
    let exhausted = || Error::PoolExhausted(self.timeout);
    // The semaphore is never closed, and a permit is only available while a
    // slot sits in `idle`.
    let permit = tokio::time::timeout(self.timeout, self.permits.acquire())
      .await
      .map_err(|_| exhausted())?
      .map_err(|_| exhausted())?;
    let slot = self.idle().pop().ok_or_else(exhausted)?;

    Ok(PooledConnection {
      slot,
      pool: self,
      timed_out: false,
      _permit: permit,
    })
  }

  /// Run `function` on a pooled connection, bounded by the pool timeout.
  ///
  /// On timeout the statement is interrupted so the connection's worker
  /// thread frees up, and the connection is parked behind the others.
  pub async fn call<F, R>(&self, function: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R>
      + Send
      + 'static,
    R: Send + 'static,
  {
    let mut pooled = self.acquire().await?;
    let outcome =
      tokio::time::timeout(self.timeout, pooled.slot.conn.call(function)).await;
    match outcome {
      Ok(result) => Ok(result?),
      Err(_) => {
        tracing::warn!(
          timeout = ?self.timeout,
          "database call timed out, interrupting"
        );
        pooled.slot.interrupt.interrupt();
        pooled.timed_out = true;
        Err(Error::Timeout(self.timeout))
      }
    }
  }

  /// Number of connections not currently checked out.
  pub fn available(&self) -> usize { self.permits.available_permits() }
}

/// A checked-out connection. Dropping it returns the connection to the pool.
pub(crate) struct PooledConnection<'a> {
  slot:      Slot,
  pool:      &'a Pool,
  timed_out: bool,
  // Declared last: released only after `Drop::drop` has put `slot` back.
  _permit:   SemaphorePermit<'a>,
}

impl Drop for PooledConnection<'_> {
  fn drop(&mut self) {
    let mut idle = self.pool.idle();
    if self.timed_out {
      // `acquire` pops from the end; hand out the others first.
      idle.insert(0, self.slot.clone());
    } else {
      idle.push(self.slot.clone());
    }
  }
}
