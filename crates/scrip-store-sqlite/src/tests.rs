//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use std::time::Duration;

use chrono::NaiveDate;
use scrip_core::{
  record::{NewRecord, RecordId},
  store::RecordStore,
};

use crate::{Error, PoolConfig, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ann_lee() -> NewRecord {
  NewRecord {
    first_name:          "Ann".into(),
    last_name:           "Lee".into(),
    contact_number:      "555-1234".into(),
    issue1:              Some("cough".into()),
    issue2:              Some("fever".into()),
    medication_process:  Some("2x daily".into()),
    date:                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
    physician_signature: "Dr. Roe".into(),
  }
}

fn patient(first_name: &str) -> NewRecord {
  NewRecord { first_name: first_name.into(), ..ann_lee() }
}

// ─── Create / list ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_list_returns_the_record() {
  let s = store().await;

  let created = s.create(ann_lee()).await.unwrap();
  assert_eq!(created.fields(), ann_lee());

  let all = s.list().await.unwrap();
  assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn optional_fields_roundtrip_as_null() {
  let s = store().await;
  let input = NewRecord {
    issue1: None,
    issue2: None,
    medication_process: None,
    ..ann_lee()
  };

  let created = s.create(input.clone()).await.unwrap();
  let fetched = s.get(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.fields(), input);
}

#[tokio::test]
async fn ids_are_unique_and_listed_in_order() {
  let s = store().await;
  let a = s.create(patient("A")).await.unwrap();
  let b = s.create(patient("B")).await.unwrap();
  let c = s.create(patient("C")).await.unwrap();

  assert!(a.id < b.id && b.id < c.id);
  let names: Vec<_> = s
    .list()
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.first_name)
    .collect();
  assert_eq!(names, ["A", "B", "C"]);
}

#[tokio::test]
async fn list_empty_store() {
  let s = store().await;
  assert!(s.list().await.unwrap().is_empty());
}

// ─── Get ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(RecordId(42)).await.unwrap().is_none());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overwrites_only_the_addressed_record() {
  let s = store().await;
  let target = s.create(ann_lee()).await.unwrap();
  let other = s.create(patient("Bob")).await.unwrap();

  let changed = NewRecord { contact_number: "555-9999".into(), ..ann_lee() };
  let updated = s.update(target.id, changed.clone()).await.unwrap().unwrap();
  assert_eq!(updated.id, target.id);
  assert_eq!(updated.fields(), changed);

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0], updated);
  assert_eq!(all[1], other);
}

#[tokio::test]
async fn update_missing_returns_none_and_writes_nothing() {
  let s = store().await;
  let existing = s.create(ann_lee()).await.unwrap();

  let result = s.update(RecordId(999), patient("Ghost")).await.unwrap();
  assert!(result.is_none());
  assert_eq!(s.list().await.unwrap(), vec![existing]);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_record() {
  let s = store().await;
  let a = s.create(patient("A")).await.unwrap();
  let b = s.create(patient("B")).await.unwrap();

  assert!(s.delete(a.id).await.unwrap());
  assert_eq!(s.list().await.unwrap(), vec![b]);
  assert!(s.get(a.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  let existing = s.create(ann_lee()).await.unwrap();

  assert!(!s.delete(RecordId(existing.id.0 + 1)).await.unwrap());
  assert_eq!(s.list().await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn deleted_ids_are_never_reused() {
  let s = store().await;
  let first = s.create(patient("A")).await.unwrap();
  let last = s.create(patient("B")).await.unwrap();
  s.delete(last.id).await.unwrap();
  s.delete(first.id).await.unwrap();

  let next = s.create(patient("C")).await.unwrap();
  assert!(next.id > last.id, "{} reused", next.id);
}

// ─── Scenario ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_update_delete_scenario() {
  let s = store().await;

  let created = s.create(ann_lee()).await.unwrap();
  assert_eq!(s.list().await.unwrap(), vec![created.clone()]);

  let changed = NewRecord { contact_number: "555-9999".into(), ..ann_lee() };
  s.update(created.id, changed).await.unwrap().unwrap();
  let after_update = s.list().await.unwrap();
  assert_eq!(after_update.len(), 1);
  assert_eq!(after_update[0].contact_number, "555-9999");
  assert_eq!(after_update[0].first_name, created.first_name);
  assert_eq!(after_update[0].issue1, created.issue1);

  assert!(s.delete(created.id).await.unwrap());
  assert!(s.list().await.unwrap().is_empty());
}

// ─── Pool ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn zero_sized_pool_is_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let config = PoolConfig { size: 0, ..PoolConfig::default() };
  let result = SqliteStore::open_with(dir.path().join("scrip.db"), config).await;
  assert!(matches!(result, Err(Error::InvalidPoolSize(0))));
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("scrip.db");

  let created = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create(ann_lee()).await.unwrap()
  };

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.list().await.unwrap(), vec![created]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_share_the_pool() {
  let dir = tempfile::tempdir().unwrap();
  let config = PoolConfig { size: 3, timeout: Duration::from_secs(10) };
  let s = SqliteStore::open_with(dir.path().join("scrip.db"), config)
    .await
    .unwrap();

  let mut handles = Vec::new();
  for i in 0..20 {
    let s = s.clone();
    handles.push(tokio::spawn(async move {
      s.create(patient(&format!("P{i}"))).await.unwrap()
    }));
  }
  let mut ids = Vec::new();
  for h in handles {
    ids.push(h.await.unwrap().id);
  }
  ids.sort();
  ids.dedup();

  assert_eq!(ids.len(), 20);
  assert_eq!(s.list().await.unwrap().len(), 20);
  assert_eq!(s.idle_connections(), 3);
}

#[tokio::test]
async fn connections_are_released_after_errors() {
  let s = store().await;

  // Break the table so every statement fails.
  s.pool
    .call(|conn| {
      conn.execute_batch("DROP TABLE prescriptionform")?;
      Ok(())
    })
    .await
    .unwrap();

  for _ in 0..3 {
    assert!(matches!(s.list().await, Err(Error::Database(_))));
    assert!(matches!(s.create(ann_lee()).await, Err(Error::Database(_))));
  }
  assert_eq!(s.idle_connections(), 1);
}

#[tokio::test]
async fn exhausted_pool_times_out() {
  let dir = tempfile::tempdir().unwrap();
  let timeout = Duration::from_millis(50);
  let config = PoolConfig { size: 1, timeout };
  let s = SqliteStore::open_with(dir.path().join("scrip.db"), config)
    .await
    .unwrap();

  let held = s.pool.acquire().await.unwrap();
  assert_eq!(s.idle_connections(), 0);

  let result = s.list().await;
  assert!(
    matches!(result, Err(Error::PoolExhausted(t)) if t == timeout),
    "{result:?}"
  );

  drop(held);
  assert_eq!(s.idle_connections(), 1);
  assert!(s.list().await.unwrap().is_empty());
}

/// Counts forever unless interrupted.
const RUNAWAY: &str = "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c)
   SELECT count(*) FROM c";

async fn assert_runaway_times_out(s: &SqliteStore, timeout: Duration) {
  let result = s
    .pool
    .call(|conn| Ok(conn.query_row(RUNAWAY, [], |row| row.get::<_, i64>(0))?))
    .await;
  assert!(
    matches!(result, Err(Error::Timeout(t)) if t == timeout),
    "{result:?}"
  );
}

#[tokio::test]
async fn timed_out_call_leaves_the_connection_usable() {
  let dir = tempfile::tempdir().unwrap();
  let timeout = Duration::from_millis(100);
  let config = PoolConfig { size: 1, timeout };
  let s = SqliteStore::open_with(dir.path().join("scrip.db"), config)
    .await
    .unwrap();

  assert_runaway_times_out(&s, timeout).await;
  assert_eq!(s.idle_connections(), 1);

  let created = s.create(ann_lee()).await.unwrap();
  assert_eq!(s.list().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn timed_out_connection_is_handed_out_last() {
  let dir = tempfile::tempdir().unwrap();
  let timeout = Duration::from_millis(100);
  let config = PoolConfig { size: 2, timeout };
  let s = SqliteStore::open_with(dir.path().join("scrip.db"), config)
    .await
    .unwrap();

  assert_runaway_times_out(&s, timeout).await;
  assert_eq!(s.idle_connections(), 2);
  for _ in 0..3 {
    assert!(s.list().await.unwrap().is_empty());
  }
}
