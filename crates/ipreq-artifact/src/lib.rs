//! Artifact layer: fills per-carrier spreadsheet and letter templates with
//! rendered rows. Templates are plain text; tables are contiguous runs of
//! tab-separated lines.

mod error;
pub mod letter;
pub mod sheet;

pub use error::ArtifactError;
pub use letter::{TextLetter, fill_letter};
pub use sheet::{fill_sheet, write_generic_sheet, write_jio_text};
