use std::io;

use csv::WriterBuilder;

use crate::error::WorklogError;
use crate::types::WorkLog;

/// Column order of the exported CSV document.
pub const CSV_HEADER: [&str; 10] = [
    "id",
    "created_at",
    "updated_at",
    "work_date",
    "category",
    "ro_number",
    "description",
    "flat_hours",
    "cash_amount",
    "location",
];

/// Writes the given records as a CSV document, header row first.
///
/// Timestamps and dates are rendered in ISO 8601. Optional fields render
/// as empty cells. Embedded newlines in `description` would break naive
/// CSV consumers, so they are collapsed to single spaces and the text is
/// trimmed before encoding.
///
/// # Errors
/// Returns `WorklogError::Csv` if writing a record fails.
pub fn write_csv<W: io::Write>(out: W, work_logs: &[WorkLog]) -> Result<(), WorklogError> {
    let mut csv_writer = WriterBuilder::new().from_writer(out);

    csv_writer.write_record(CSV_HEADER)?;
    for work_log in work_logs {
        csv_writer.write_record(&[
            work_log.id.to_string(),
            work_log.created_at.to_rfc3339(),
            work_log.updated_at.to_rfc3339(),
            work_log.work_date.to_string(),
            work_log.category.clone(),
            work_log.ro_number.clone().unwrap_or_default(),
            flatten_description(work_log.description.as_deref()),
            work_log.flat_hours.to_string(),
            work_log.cash_amount.to_string(),
            work_log.location.clone().unwrap_or_default(),
        ])?;
    }
    csv_writer
        .flush()
        .map_err(|e| WorklogError::Csv(format!("{e}")))?;

    Ok(())
}

fn flatten_description(description: Option<&str>) -> String {
    match description {
        Some(text) => text
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ")
            .trim()
            .to_string(),
        None => String::new(),
    }
}
