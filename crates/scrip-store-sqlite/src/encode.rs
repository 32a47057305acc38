//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` strings; ids as SQLite integers.

use chrono::NaiveDate;
use scrip_core::record::{PrescriptionRecord, RecordId};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// A `prescriptionform` row as read from SQLite, before date decoding.
pub struct RawRecord {
  pub id:                  i64,
  pub first_name:          String,
  pub last_name:           String,
  pub contact_number:      String,
  pub issue1:              Option<String>,
  pub issue2:              Option<String>,
  pub medication_process:  Option<String>,
  pub date:                String,
  pub physician_signature: String,
}

impl RawRecord {
  /// Map a row selected with [`crate::schema::COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      first_name:          row.get(1)?,
      last_name:           row.get(2)?,
      contact_number:      row.get(3)?,
      issue1:              row.get(4)?,
      issue2:              row.get(5)?,
      medication_process:  row.get(6)?,
      date:                row.get(7)?,
      physician_signature: row.get(8)?,
    })
  }

  pub fn into_record(self) -> Result<PrescriptionRecord> {
    Ok(PrescriptionRecord {
      id:                  RecordId(self.id),
      first_name:          self.first_name,
      last_name:           self.last_name,
      contact_number:      self.contact_number,
      issue1:              self.issue1,
      issue2:              self.issue2,
      medication_process:  self.medication_process,
      date:                decode_date(&self.date)?,
      physician_signature: self.physician_signature,
    })
  }
}
