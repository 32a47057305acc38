//! Prescription records — the single entity the service persists.
//!
//! Field names on the wire follow the clinic's existing web form
//! (`Firstname`, `n2`, `Physiciansignature`, ...). The camelCase spellings are
//! accepted as aliases when decoding.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Server-assigned primary key of a [`PrescriptionRecord`].
///
/// Ids are never reused, even after the record they named is deleted.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

// ─── NewRecord ───────────────────────────────────────────────────────────────

/// A validated record that has not been assigned an id yet.
///
/// Produced by [`crate::form::RecordForm::validate`]; input to
/// [`crate::store::RecordStore::create`] and
/// [`crate::store::RecordStore::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
  pub first_name:          String,
  pub last_name:           String,
  pub contact_number:      String,
  pub issue1:              Option<String>,
  pub issue2:              Option<String>,
  /// How the patient should take the medication.
  pub medication_process:  Option<String>,
  pub date:                NaiveDate,
  pub physician_signature: String,
}

// ─── PrescriptionRecord ──────────────────────────────────────────────────────

/// A stored prescription form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionRecord {
  pub id:                  RecordId,
  #[serde(rename = "Firstname", alias = "firstName")]
  pub first_name:          String,
  #[serde(rename = "Lastname", alias = "lastName")]
  pub last_name:           String,
  #[serde(rename = "Contactnumber", alias = "contactNumber")]
  pub contact_number:      String,
  #[serde(rename = "Issue1", alias = "issue1")]
  pub issue1:              Option<String>,
  #[serde(rename = "Issue2", alias = "issue2")]
  pub issue2:              Option<String>,
  #[serde(rename = "n2", alias = "medicationProcess")]
  pub medication_process:  Option<String>,
  /// Serialised as `YYYY-MM-DD`.
  #[serde(rename = "Date", alias = "date")]
  pub date:                NaiveDate,
  #[serde(rename = "Physiciansignature", alias = "physicianSignature")]
  pub physician_signature: String,
}

impl PrescriptionRecord {
  /// Attach a store-assigned id to validated fields.
  pub fn from_parts(id: RecordId, fields: NewRecord) -> Self {
    Self {
      id,
      first_name: fields.first_name,
      last_name: fields.last_name,
      contact_number: fields.contact_number,
      issue1: fields.issue1,
      issue2: fields.issue2,
      medication_process: fields.medication_process,
      date: fields.date,
      physician_signature: fields.physician_signature,
    }
  }

  /// The record's fields without its id.
  pub fn fields(&self) -> NewRecord {
    NewRecord {
      first_name:          self.first_name.clone(),
      last_name:           self.last_name.clone(),
      contact_number:      self.contact_number.clone(),
      issue1:              self.issue1.clone(),
      issue2:              self.issue2.clone(),
      medication_process:  self.medication_process.clone(),
      date:                self.date,
      physician_signature: self.physician_signature.clone(),
    }
  }
}
