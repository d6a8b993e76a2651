//! Spreadsheet artifacts.
//!
//! Carrier spreadsheets start from a pre-existing template whose header row
//! is already in place; rendered rows are appended after the existing
//! content. The generic sheet and the JIO flat export carry their own
//! headers and need no template.

use std::fs;
use std::path::Path;
use tracing::info;

use ipreq_core::dialect::FieldRow;

use crate::error::ArtifactError;

/// Header for the generic sheet covering carriers without a dedicated
/// format.
pub const GENERIC_HEADER: [&str; 6] = ["IP Type", "IP Address", "Date", "Time", "From Date", "To Date"];

/// Header of the JIO flat export. The last column label repeats
/// "From Time" — that is what the carrier's own sample file says, and the
/// intake side matches on it, so it is preserved verbatim.
pub const JIO_TEXT_HEADER: &str = "Type\tSearch Value\tFrom Date YYYYMMDD\tFrom Time HHMMSS (IST)\tTo Date YYYYMMDD\tFrom Time HHMMSS (IST)";

/// Append rendered rows to a copy of a carrier spreadsheet template.
pub fn fill_sheet(template: &Path, out: &Path, rows: &[FieldRow]) -> Result<(), ArtifactError> {
    if !template.is_file() {
        return Err(ArtifactError::TemplateMissing(template.to_path_buf()));
    }
    let mut content = fs::read_to_string(template)?;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    push_rows(&mut content, rows);
    fs::write(out, content)?;
    info!(out = %out.display(), rows = rows.len(), "wrote sheet");
    Ok(())
}

/// Write the generic sheet from scratch, header included.
pub fn write_generic_sheet(out: &Path, rows: &[FieldRow]) -> Result<(), ArtifactError> {
    let mut content = GENERIC_HEADER.join("\t");
    content.push('\n');
    push_rows(&mut content, rows);
    fs::write(out, content)?;
    info!(out = %out.display(), rows = rows.len(), "wrote generic sheet");
    Ok(())
}

/// Write the JIO tab-separated flat export, header included.
pub fn write_jio_text(out: &Path, rows: &[FieldRow]) -> Result<(), ArtifactError> {
    let mut content = String::from(JIO_TEXT_HEADER);
    content.push('\n');
    push_rows(&mut content, rows);
    fs::write(out, content)?;
    info!(out = %out.display(), rows = rows.len(), "wrote JIO text export");
    Ok(())
}

fn push_rows(content: &mut String, rows: &[FieldRow]) {
    for row in rows {
        content.push_str(&row.join("\t"));
        content.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(cells: &[&str]) -> FieldRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn missing_template_is_reported_not_a_crash() {
        let dir = tempdir().unwrap();
        let err = fill_sheet(
            &dir.path().join("no_such_template.tsv"),
            &dir.path().join("out.tsv"),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ArtifactError::TemplateMissing(_)));
    }

    #[test]
    fn rows_append_after_existing_content() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("jio_ip.tsv");
        fs::write(&template, "Type\tSearch Value\n").unwrap();

        let out = dir.path().join("out.tsv");
        fill_sheet(&template, &out, &[row(&["IPV4", "1.1.1.1"])]).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written, "Type\tSearch Value\nIPV4\t1.1.1.1\n");
    }

    #[test]
    fn template_without_trailing_newline_still_appends_cleanly() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("jio_ip.tsv");
        fs::write(&template, "Type\tSearch Value").unwrap();

        let out = dir.path().join("out.tsv");
        fill_sheet(&template, &out, &[row(&["IPV4", "1.1.1.1"])]).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    fn generic_sheet_writes_its_own_header() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("generic.tsv");
        write_generic_sheet(&out, &[row(&["IPV4", "1.1.1.1", "a", "b", "c", "d"])]).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next().unwrap(), GENERIC_HEADER.join("\t"));
        assert_eq!(lines.next().unwrap(), "IPV4\t1.1.1.1\ta\tb\tc\td");
    }

    #[test]
    fn jio_text_header_keeps_the_sample_quirk() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("jio.txt");
        write_jio_text(&out, &[]).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written.matches("From Time HHMMSS (IST)").count(), 2);
    }
}
