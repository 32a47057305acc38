//! The submitted form payload and its validation.
//!
//! A [`RecordForm`] is only structurally decoded: every field is an optional
//! string. [`RecordForm::validate`] applies the required-field policy and
//! parses the date, producing a [`NewRecord`]. No other business rules are
//! checked (a date in the future is accepted).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  Result, ValidationError,
  record::{NewRecord, PrescriptionRecord},
};

/// Request body for `POST /submit`, `PUT /update/{id}` and
/// `PATCH /update/{id}`.
///
/// Unknown fields (including an `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordForm {
  #[serde(rename = "Firstname", alias = "firstName", skip_serializing_if = "Option::is_none")]
  pub first_name:          Option<String>,
  #[serde(rename = "Lastname", alias = "lastName", skip_serializing_if = "Option::is_none")]
  pub last_name:           Option<String>,
  #[serde(rename = "Contactnumber", alias = "contactNumber", skip_serializing_if = "Option::is_none")]
  pub contact_number:      Option<String>,
  #[serde(rename = "Issue1", alias = "issue1", skip_serializing_if = "Option::is_none")]
  pub issue1:              Option<String>,
  #[serde(rename = "Issue2", alias = "issue2", skip_serializing_if = "Option::is_none")]
  pub issue2:              Option<String>,
  #[serde(rename = "n2", alias = "medicationProcess", skip_serializing_if = "Option::is_none")]
  pub medication_process:  Option<String>,
  #[serde(rename = "Date", alias = "date", skip_serializing_if = "Option::is_none")]
  pub date:                Option<String>,
  #[serde(rename = "Physiciansignature", alias = "physicianSignature", skip_serializing_if = "Option::is_none")]
  pub physician_signature: Option<String>,
}

impl RecordForm {
  /// Check required fields and parse the date.
  ///
  /// Missing fields are reported together, ahead of any date error.
  pub fn validate(self) -> Result<NewRecord> {
    let mut missing = Vec::new();
    let first_name = required(self.first_name, "Firstname", &mut missing);
    let last_name = required(self.last_name, "Lastname", &mut missing);
    let contact_number =
      required(self.contact_number, "Contactnumber", &mut missing);
    let date = required(self.date, "Date", &mut missing);
    let physician_signature =
      required(self.physician_signature, "Physiciansignature", &mut missing);

    let (
      Some(first_name),
      Some(last_name),
      Some(contact_number),
      Some(date),
      Some(physician_signature),
    ) = (first_name, last_name, contact_number, date, physician_signature)
    else {
      return Err(ValidationError::MissingFields(missing));
    };

    let date =
      parse_date(&date).ok_or(ValidationError::InvalidDate(date))?;

    Ok(NewRecord {
      first_name,
      last_name,
      contact_number,
      issue1: self.issue1,
      issue2: self.issue2,
      medication_process: self.medication_process,
      date,
      physician_signature,
    })
  }

  /// Merge-patch: fields set on `self` win, the rest come from `base`.
  pub fn merged_over(self, base: &PrescriptionRecord) -> Self {
    Self {
      first_name:          self.first_name.or_else(|| Some(base.first_name.clone())),
      last_name:           self.last_name.or_else(|| Some(base.last_name.clone())),
      contact_number:      self
        .contact_number
        .or_else(|| Some(base.contact_number.clone())),
      issue1:              self.issue1.or_else(|| base.issue1.clone()),
      issue2:              self.issue2.or_else(|| base.issue2.clone()),
      medication_process:  self
        .medication_process
        .or_else(|| base.medication_process.clone()),
      date:                self.date.or_else(|| Some(base.date.to_string())),
      physician_signature: self
        .physician_signature
        .or_else(|| Some(base.physician_signature.clone())),
    }
  }
}

/// Returns the value if it is present and not blank; otherwise records `name`
/// as missing.
fn required(
  value: Option<String>,
  name: &'static str,
  missing: &mut Vec<&'static str>,
) -> Option<String> {
  match value {
    Some(v) if !v.trim().is_empty() => Some(v),
    _ => {
      missing.push(name);
      None
    }
  }
}

/// Parse a calendar date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp (as emitted by browser date pickers). Timestamps yield the date
/// in their own offset.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
  let s = s.trim();
  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Some(date);
  }
  DateTime::parse_from_rfc3339(s)
    .ok()
    .map(|dt| dt.date_naive())
}
