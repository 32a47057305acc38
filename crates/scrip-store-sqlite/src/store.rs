//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::{path::Path, sync::Arc};

use rusqlite::OptionalExtension as _;
use scrip_core::{
  record::{NewRecord, PrescriptionRecord, RecordId},
  store::RecordStore,
};
use tokio_rusqlite::Connection;

use crate::{
  Error, Result,
  encode::{RawRecord, encode_date},
  pool::{Pool, PoolConfig, Slot},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A prescription-record store backed by a single SQLite file.
///
/// Cloning is cheap — clones share the same connection pool.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) pool: Arc<Pool>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with the default [`PoolConfig`].
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with(path, PoolConfig::default()).await
  }

  /// Open (or create) a store at `path`, opening `config.size` connections
  /// and running schema initialisation on the first.
  pub async fn open_with(
    path: impl AsRef<Path>,
    config: PoolConfig,
  ) -> Result<Self> {
    if config.size == 0 {
      return Err(Error::InvalidPoolSize(config.size));
    }
    let path = path.as_ref();

    let mut slots = Vec::with_capacity(config.size);
    for i in 0..config.size {
      let conn = Connection::open(path).await?;
      configure(&conn, config, i == 0).await?;
      slots.push(Slot::new(conn).await?);
    }

    tracing::debug!(
      path = %path.display(),
      size = config.size,
      "opened sqlite connection pool"
    );
    Ok(Self { pool: Arc::new(Pool::new(slots, config.timeout)) })
  }

  /// Open an in-memory store — useful for testing.
  ///
  /// An in-memory SQLite database lives inside one connection, so the pool
  /// holds exactly one.
  pub async fn open_in_memory() -> Result<Self> {
    let config = PoolConfig { size: 1, ..PoolConfig::default() };
    let conn = Connection::open_in_memory().await?;
    configure(&conn, config, true).await?;
    let slot = Slot::new(conn).await?;
    Ok(Self { pool: Arc::new(Pool::new(vec![slot], config.timeout)) })
  }

  /// Number of pooled connections not currently in use.
  pub fn idle_connections(&self) -> usize { self.pool.available() }
}

/// Per-connection setup; the schema only needs to run once per database.
async fn configure(
  conn: &Connection,
  config: PoolConfig,
  init_schema: bool,
) -> Result<()> {
  conn
    .call(move |conn| {
      conn.busy_timeout(config.timeout)?;
      if init_schema {
        conn.execute_batch(SCHEMA)?;
      }
      Ok(())
    })
    .await?;
  Ok(())
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewRecord) -> Result<PrescriptionRecord> {
    let date_str = encode_date(input.date);
    let row = input.clone();

    let id = self
      .pool
      .call(move |conn| {
        conn.execute(
          "INSERT INTO prescriptionform (
             first_name, last_name, contact_number, issue1, issue2,
             medication_process, date, physician_signature
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            row.first_name,
            row.last_name,
            row.contact_number,
            row.issue1,
            row.issue2,
            row.medication_process,
            date_str,
            row.physician_signature,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(PrescriptionRecord::from_parts(RecordId(id), input))
  }

  async fn list(&self) -> Result<Vec<PrescriptionRecord>> {
    let raws: Vec<RawRecord> = self
      .pool
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM prescriptionform ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn get(&self, id: RecordId) -> Result<Option<PrescriptionRecord>> {
    let raw: Option<RawRecord> = self
      .pool
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM prescriptionform WHERE id = ?1"),
              rusqlite::params![id.0],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn update(
    &self,
    id: RecordId,
    input: NewRecord,
  ) -> Result<Option<PrescriptionRecord>> {
    let date_str = encode_date(input.date);
    let row = input.clone();

    let changed = self
      .pool
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE prescriptionform SET
             first_name = ?1, last_name = ?2, contact_number = ?3,
             issue1 = ?4, issue2 = ?5, medication_process = ?6,
             date = ?7, physician_signature = ?8
           WHERE id = ?9",
          rusqlite::params![
            row.first_name,
            row.last_name,
            row.contact_number,
            row.issue1,
            row.issue2,
            row.medication_process,
            date_str,
            row.physician_signature,
            id.0,
          ],
        )?)
      })
      .await?;

    Ok((changed > 0).then(|| PrescriptionRecord::from_parts(id, input)))
  }

  async fn delete(&self, id: RecordId) -> Result<bool> {
    let changed = self
      .pool
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM prescriptionform WHERE id = ?1",
          rusqlite::params![id.0],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
