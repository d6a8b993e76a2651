//! Record extraction from the subscriber-activity report.
//!
//! The report is a semi-structured HTML export: subject metadata lives in
//! `<li>` items with fixed label prefixes, and login events live in tables
//! whose header row carries both an `IP Address` and a `Timestamp` column.

use scraper::{Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::record::{CaseMetadata, RawRecord};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("report not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read report: {0}")]
    Io(#[from] std::io::Error),
}

/// Read and extract a report from disk.
///
/// An absent path is the only fatal extraction failure. A readable document
/// with no qualifying activity table yields an empty record sequence.
pub fn extract_report(path: &Path) -> Result<(CaseMetadata, Vec<RawRecord>), ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    let html = fs::read_to_string(path)?;
    Ok(extract_from_html(&html))
}

/// Extract case metadata and login records from report markup.
pub fn extract_from_html(html: &str) -> (CaseMetadata, Vec<RawRecord>) {
    let document = Html::parse_document(html);
    let metadata = extract_metadata(&document);
    let records = extract_records(&document);
    debug!(
        subject = %metadata.subject_name,
        records = records.len(),
        "extracted report"
    );
    (metadata, records)
}

/// Scan list items for the `Name:` / `e-Mail:` label prefixes. Reports are
/// single-subject, so the first match of each label wins.
fn extract_metadata(document: &Html) -> CaseMetadata {
    let li = Selector::parse("li").expect("static selector");
    let mut metadata = CaseMetadata::default();
    let mut name_seen = false;
    let mut email_seen = false;

    for item in document.select(&li) {
        let text = item.text().collect::<String>();
        let text = text.trim();
        if !name_seen {
            if let Some(rest) = text.strip_prefix("Name:") {
                metadata.subject_name = rest.trim().to_string();
                name_seen = true;
                continue;
            }
        }
        if !email_seen {
            if let Some(rest) = text.strip_prefix("e-Mail:") {
                metadata.contact_email = rest.trim().to_string();
                email_seen = true;
            }
        }
    }
    metadata
}

/// Scan every table; a table qualifies only if its headers contain both
/// `IP Address` and `Timestamp` (exact, case-sensitive). Records from all
/// qualifying tables are concatenated in document order.
fn extract_records(document: &Html) -> Vec<RawRecord> {
    let table = Selector::parse("table").expect("static selector");
    let th = Selector::parse("th").expect("static selector");
    let tr = Selector::parse("tr").expect("static selector");
    let td = Selector::parse("td").expect("static selector");

    let mut records = Vec::new();
    for candidate in document.select(&table) {
        let headers: Vec<String> = candidate
            .select(&th)
            .map(|h| h.text().collect::<String>().trim().to_string())
            .collect();
        if !headers.iter().any(|h| h == "IP Address") || !headers.iter().any(|h| h == "Timestamp") {
            continue;
        }

        // Skip the header row; column 0 is the timestamp, column 1 the IP.
        for row in candidate.select(&tr).skip(1) {
            let cells: Vec<String> = row
                .select(&td)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect();
            if cells.len() < 2 {
                continue;
            }
            if cells[1].is_empty() {
                continue;
            }
            records.push(RawRecord {
                timestamp_text: cells[0].clone(),
                ip_text: cells[1].clone(),
            });
        }
    }
    records
}
