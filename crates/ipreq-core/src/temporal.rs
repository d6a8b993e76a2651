//! Timestamp normalization: source time base to regional local time, plus
//! the symmetric request window.
//!
//! Report timestamps are `YYYY-MM-DD HH:MM:SS` with a literal ` Z` suffix.
//! Local time is the parsed value plus a fixed +05:30 offset (IST). This is
//! a fixed regional offset, not a timezone-rule lookup; there is no DST in
//! the target region.

use chrono::{Duration, Local, NaiveDateTime};
use tracing::warn;

const SOURCE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fixed offset from the source time base to local time (IST, +05:30).
const REGIONAL_OFFSET_MINUTES: i64 = 5 * 60 + 30;

/// Half-width of the request window. Registry timestamps are imprecise, so
/// every carrier is asked for a ±5 minute interval around the login.
const WINDOW_HALF_MINUTES: i64 = 5;

/// Local login time and the request window around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestWindow {
    pub local_time: NaiveDateTime,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
}

/// Normalize a source timestamp into local time and its request window.
///
/// A malformed timestamp degrades to the current wall-clock time rather
/// than dropping the record: a single bad row must not abort a batch, and
/// the record is still worth a carrier request even with an imprecise time.
pub fn normalize(timestamp_text: &str) -> RequestWindow {
    let local_time = match parse_source_timestamp(timestamp_text) {
        Some(source) => source + Duration::minutes(REGIONAL_OFFSET_MINUTES),
        None => {
            warn!(timestamp = %timestamp_text, "unparseable timestamp, using current time");
            Local::now().naive_local()
        }
    };
    RequestWindow {
        local_time,
        window_start: local_time - Duration::minutes(WINDOW_HALF_MINUTES),
        window_end: local_time + Duration::minutes(WINDOW_HALF_MINUTES),
    }
}

fn parse_source_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    let bare = trimmed.strip_suffix(" Z").unwrap_or(trimmed);
    NaiveDateTime::parse_from_str(bare, SOURCE_FORMAT).ok()
}
