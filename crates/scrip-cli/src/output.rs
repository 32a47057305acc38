//! Plain-text rendering of records for the terminal.

use std::io::{self, Write};

use scrip_core::record::PrescriptionRecord;

const HEADERS: [&str; 7] =
  ["ID", "PATIENT", "CONTACT", "DATE", "ISSUES", "MEDICATION", "PHYSICIAN"];

fn cells(r: &PrescriptionRecord) -> [String; 7] {
  let issues = [r.issue1.as_deref(), r.issue2.as_deref()]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join("; ");

  [
    r.id.to_string(),
    format!("{} {}", r.first_name, r.last_name),
    r.contact_number.clone(),
    r.date.to_string(),
    or_dash(issues),
    or_dash(r.medication_process.clone().unwrap_or_default()),
    r.physician_signature.clone(),
  ]
}

fn or_dash(s: String) -> String {
  if s.is_empty() { "-".to_string() } else { s }
}

/// Write `records` as a left-aligned table with a header row.
pub fn write_table(out: &mut impl Write, records: &[PrescriptionRecord]) -> io::Result<()> {
  if records.is_empty() {
    return writeln!(out, "No records.");
  }

  let rows: Vec<[String; 7]> = records.iter().map(cells).collect();
  let mut widths = HEADERS.map(|h| h.chars().count());
  for row in &rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  write_row(out, &HEADERS.map(str::to_string), &widths)?;
  for row in &rows {
    write_row(out, row, &widths)?;
  }
  Ok(())
}

fn write_row(out: &mut impl Write, row: &[String; 7], widths: &[usize; 7]) -> io::Result<()> {
  let line = row
    .iter()
    .zip(widths)
    .map(|(cell, &width)| format!("{cell:<width$}"))
    .collect::<Vec<_>>()
    .join("  ");
  writeln!(out, "{}", line.trim_end())
}
