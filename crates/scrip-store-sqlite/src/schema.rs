//! SQL schema for the Scrip SQLite store.
//!
//! Executed once at store startup. `PRAGMA user_version` records the schema
//! revision; future changes will be gated on that number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids from being reused after a delete.
CREATE TABLE IF NOT EXISTS prescriptionform (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name          TEXT NOT NULL,
    last_name           TEXT NOT NULL,
    contact_number      TEXT NOT NULL,
    issue1              TEXT,
    issue2              TEXT,
    medication_process  TEXT,
    date                TEXT NOT NULL,   -- ISO 8601 calendar date
    physician_signature TEXT NOT NULL
);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT`, in [`crate::encode::RawRecord`]
/// field order.
pub const COLUMNS: &str = "id, first_name, last_name, contact_number, issue1, \
                           issue2, medication_process, date, physician_signature";
