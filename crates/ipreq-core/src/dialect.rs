//! Per-carrier formatting dialects.
//!
//! Each carrier's compliance department expects its own date/time rendering
//! and row shape. Adapters here are pure: resolved records in, literal field
//! values out; writing them into an artifact is the caller's concern.

use crate::record::{Carrier, ResolvedRecord};

/// One rendered artifact row, ordered to match the target column contract.
pub type FieldRow = Vec<String>;

/// JIO spreadsheet/text rows: type, value, from-date (`YYYYMMDD`),
/// from-time (`HHMMSS`), to-date, to-time.
pub fn jio_window_rows(records: &[ResolvedRecord]) -> Vec<FieldRow> {
    records
        .iter()
        .map(|r| {
            vec![
                r.family.label().to_string(),
                r.ip.clone(),
                r.window_start.format("%Y%m%d").to_string(),
                r.window_start.format("%H%M%S").to_string(),
                r.window_end.format("%Y%m%d").to_string(),
                r.window_end.format("%H%M%S").to_string(),
            ]
        })
        .collect()
}

/// Airtel spreadsheet rows: type, value, date (`DD-Mon-YYYY`), time.
/// A single instant, not a window.
pub fn airtel_instant_rows(records: &[ResolvedRecord]) -> Vec<FieldRow> {
    records
        .iter()
        .map(|r| {
            vec![
                r.family.label().to_string(),
                r.ip.clone(),
                r.local_time.format("%d-%b-%Y").to_string(),
                r.local_time.format("%H:%M:%S").to_string(),
            ]
        })
        .collect()
}

/// Generic sheet rows for carriers without a dedicated format: type, value,
/// date, time, then the window bounds as combined date-time cells.
pub fn generic_rows(records: &[ResolvedRecord]) -> Vec<FieldRow> {
    records
        .iter()
        .map(|r| {
            vec![
                r.family.label().to_string(),
                r.ip.clone(),
                r.local_time.format("%d-%m-%Y").to_string(),
                r.local_time.format("%H:%M:%S").to_string(),
                r.window_start.format("%d-%m-%Y %H:%M:%S").to_string(),
                r.window_end.format("%d-%m-%Y %H:%M:%S").to_string(),
            ]
        })
        .collect()
}

/// Letter-table rows in the carrier's dialect.
///
/// Wide tables (6+ columns) get separate date and time cells for each
/// window bound; narrower tables get the compact 4-column shape with date
/// and time joined by a newline in one cell.
pub fn letter_rows(carrier: Carrier, columns: usize, records: &[ResolvedRecord]) -> Vec<FieldRow> {
    let (date_fmt, time_fmt) = letter_formats(carrier);
    records
        .iter()
        .map(|r| {
            if columns >= 6 {
                vec![
                    r.family.label().to_string(),
                    r.ip.clone(),
                    r.window_start.format(date_fmt).to_string(),
                    r.window_start.format(time_fmt).to_string(),
                    r.window_end.format(date_fmt).to_string(),
                    r.window_end.format(time_fmt).to_string(),
                ]
            } else {
                let combined = |t: &chrono::NaiveDateTime| {
                    format!("{}\n{}", t.format(date_fmt), t.format(time_fmt))
                };
                vec![
                    r.family.label().to_string(),
                    r.ip.clone(),
                    combined(&r.window_start),
                    combined(&r.window_end),
                ]
            }
        })
        .collect()
}

/// Date/time format strings for a carrier's letter dialect.
fn letter_formats(carrier: Carrier) -> (&'static str, &'static str) {
    match carrier {
        Carrier::Jio => ("%Y%m%d", "%H%M%S"),
        Carrier::Vi => ("%d.%m.%Y", "%H:%M:%S"),
        Carrier::Airtel => ("%d/%b/%Y", "%H:%M:%S"),
        _ => ("%d-%m-%Y", "%H:%M:%S"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;

    fn jio_record() -> ResolvedRecord {
        ResolvedRecord::from_raw(
            RawRecord {
                timestamp_text: "2025-07-11 15:26:17 Z".to_string(),
                ip_text: "49.36.112.8".to_string(),
            },
            Carrier::Jio,
        )
    }

    #[test]
    fn jio_round_trip_from_source_timestamp() {
        // 15:26:17 Z + 05:30 = 20:56:17 local, window 20:51:17 .. 21:01:17.
        let rows = jio_window_rows(&[jio_record()]);
        assert_eq!(
            rows[0],
            vec!["IPV4", "49.36.112.8", "20250711", "205117", "20250711", "210117"]
        );
    }

    #[test]
    fn airtel_sheet_is_a_single_instant() {
        let record = ResolvedRecord::from_raw(
            RawRecord {
                timestamp_text: "2025-07-09 10:00:00 Z".to_string(),
                ip_text: "59.99.1.1".to_string(),
            },
            Carrier::Airtel,
        );
        let rows = airtel_instant_rows(&[record]);
        assert_eq!(rows[0], vec!["IPV4", "59.99.1.1", "09-Jul-2025", "15:30:00"]);
    }

    #[test]
    fn generic_rows_combine_window_bounds() {
        let record = ResolvedRecord::from_raw(
            RawRecord {
                timestamp_text: "2025-07-11 15:26:17 Z".to_string(),
                ip_text: "103.5.1.2".to_string(),
            },
            Carrier::Other,
        );
        let rows = generic_rows(&[record]);
        assert_eq!(rows[0].len(), 6);
        assert_eq!(rows[0][2], "11-07-2025");
        assert_eq!(rows[0][4], "11-07-2025 20:51:17");
        assert_eq!(rows[0][5], "11-07-2025 21:01:17");
    }

    #[test]
    fn wide_letter_table_gets_separate_date_and_time_cells() {
        let rows = letter_rows(Carrier::Jio, 6, &[jio_record()]);
        assert_eq!(
            rows[0],
            vec!["IPV4", "49.36.112.8", "20250711", "205117", "20250711", "210117"]
        );
    }

    #[test]
    fn narrow_letter_table_gets_compact_cells() {
        let rows = letter_rows(Carrier::Vi, 4, &[jio_record()]);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0][2], "11.07.2025\n20:51:17");
        assert_eq!(rows[0][3], "11.07.2025\n21:01:17");
    }

    #[test]
    fn airtel_letter_uses_slash_month_dialect() {
        let rows = letter_rows(Carrier::Airtel, 6, &[jio_record()]);
        assert_eq!(rows[0][2], "11/Jul/2025");
    }

    #[test]
    fn unmapped_carrier_letter_falls_back_to_generic_dialect() {
        let rows = letter_rows(Carrier::Bsnl, 6, &[jio_record()]);
        assert_eq!(rows[0][2], "11-07-2025");
        assert_eq!(rows[0][3], "20:51:17");
    }
}
