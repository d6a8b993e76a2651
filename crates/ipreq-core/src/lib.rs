//! Core pipeline for turning a subscriber IP-activity report into
//! carrier-specific request data: extraction, temporal normalization,
//! grouping, and per-carrier format dialects.

pub mod dialect;
pub mod extract;
pub mod group;
pub mod letter;
pub mod record;
pub mod temporal;

pub use extract::{ExtractError, extract_report};
pub use group::{GroupedRecords, group_by_carrier};
pub use letter::{LetterError, TemplateSink, fill_letter};
pub use record::{AddressFamily, Carrier, CaseMetadata, RawRecord, ResolvedRecord};
pub use temporal::{RequestWindow, normalize};
