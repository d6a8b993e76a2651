//! Letter rendering over a template capability seam.
//!
//! The core never touches a concrete document format. It renders against
//! [`TemplateSink`]: placeholder substitution in the narrative text plus
//! table enumeration, row clearing, and row appending. The artifact layer
//! supplies the real implementation; tests use an in-memory fake.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::dialect;
use crate::record::{Carrier, CaseMetadata, ResolvedRecord};

/// Capability interface over a loaded letter template.
pub trait TemplateSink {
    /// Replace every occurrence of `key` in the narrative text.
    fn substitute(&mut self, key: &str, value: &str);
    fn table_count(&self) -> usize;
    /// Header cells of the given table.
    fn table_header(&self, table: usize) -> Vec<String>;
    /// Drop every row except the header.
    fn clear_rows(&mut self, table: usize);
    fn append_row(&mut self, table: usize, row: &[String]);
}

#[derive(Debug, Error)]
pub enum LetterError {
    #[error("no qualifying data table in template")]
    TableNotFound,
}

/// Fill a letter template: substitute the named placeholders, locate the
/// data table, clear its sample rows, and append one row per record in the
/// carrier's dialect.
///
/// `today` is the generation date for the `{DATE}` placeholder; callers
/// pass the current date, tests pass a fixed one.
pub fn fill_letter(
    sink: &mut dyn TemplateSink,
    metadata: &CaseMetadata,
    carrier: Carrier,
    records: &[ResolvedRecord],
    today: NaiveDate,
) -> Result<(), LetterError> {
    for (key, value) in placeholders(metadata, carrier, today) {
        sink.substitute(key, &value);
    }

    let table = find_target_table(sink).ok_or(LetterError::TableNotFound)?;
    let columns = sink.table_header(table).len();
    debug!(table, columns, carrier = %carrier, "filling letter table");

    sink.clear_rows(table);
    for row in dialect::letter_rows(carrier, columns, records) {
        sink.append_row(table, &row);
    }
    Ok(())
}

/// Named placeholders substituted into the letter narrative.
pub fn placeholders(
    metadata: &CaseMetadata,
    carrier: Carrier,
    today: NaiveDate,
) -> Vec<(&'static str, String)> {
    vec![
        ("{NAME}", metadata.subject_name.clone()),
        ("{EMAIL}", metadata.contact_email.clone()),
        ("{FIR_NO}", metadata.fir_number.clone()),
        ("{FIR_DATE}", metadata.fir_date.clone()),
        ("{ISP_NAME}", carrier.legal_name().to_string()),
        ("{DATE}", today.format("%d.%m.%Y").to_string()),
    ]
}

/// The data table is the first one whose header mentions `Search Value` or
/// `IP` — the same substring policy the carriers' own sample letters follow.
fn find_target_table(sink: &dyn TemplateSink) -> Option<usize> {
    (0..sink.table_count()).find(|&idx| {
        sink.table_header(idx)
            .iter()
            .any(|h| h.contains("Search Value") || h.contains("IP"))
    })
}
