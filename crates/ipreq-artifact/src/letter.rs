//! Plain-text request letters.
//!
//! A letter template is narrative paragraphs plus at least one data table.
//! Tables are contiguous runs of tab-separated lines, first line = header.
//! This module supplies the concrete [`TemplateSink`] the core letter
//! renderer writes through.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::info;

use ipreq_core::record::{Carrier, CaseMetadata, ResolvedRecord};
use ipreq_core::{LetterError, TemplateSink};

use crate::error::ArtifactError;

enum Block {
    Paragraph(String),
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
}

/// A parsed letter template, mutable through [`TemplateSink`].
pub struct TextLetter {
    blocks: Vec<Block>,
    // Indices of the table blocks, in document order.
    tables: Vec<usize>,
}

impl TextLetter {
    pub fn parse(content: &str) -> Self {
        let mut blocks: Vec<Block> = Vec::new();
        let mut tables = Vec::new();

        for line in content.lines() {
            if line.contains('\t') {
                let cells: Vec<String> = line.split('\t').map(|c| c.trim().to_string()).collect();
                match blocks.last_mut() {
                    Some(Block::Table { rows, .. }) => rows.push(cells),
                    _ => {
                        tables.push(blocks.len());
                        blocks.push(Block::Table { header: cells, rows: Vec::new() });
                    }
                }
            } else {
                blocks.push(Block::Paragraph(line.to_string()));
            }
        }
        Self { blocks, tables }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Table { header, rows } => {
                    out.push_str(&header.join("\t"));
                    out.push('\n');
                    for row in rows {
                        out.push_str(&row.join("\t"));
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    fn table_mut(&mut self, table: usize) -> Option<&mut Block> {
        let idx = *self.tables.get(table)?;
        self.blocks.get_mut(idx)
    }
}

impl TemplateSink for TextLetter {
    fn substitute(&mut self, key: &str, value: &str) {
        for block in &mut self.blocks {
            if let Block::Paragraph(text) = block {
                if text.contains(key) {
                    *text = text.replace(key, value);
                }
            }
        }
    }

    fn table_count(&self) -> usize {
        self.tables.len()
    }

    fn table_header(&self, table: usize) -> Vec<String> {
        match self.tables.get(table).and_then(|&idx| self.blocks.get(idx)) {
            Some(Block::Table { header, .. }) => header.clone(),
            _ => Vec::new(),
        }
    }

    fn clear_rows(&mut self, table: usize) {
        if let Some(Block::Table { rows, .. }) = self.table_mut(table) {
            rows.clear();
        }
    }

    fn append_row(&mut self, table: usize, row: &[String]) {
        if let Some(Block::Table { rows, .. }) = self.table_mut(table) {
            // Flat text rows cannot carry multi-line cells; the compact
            // letter shape joins date and time with a newline, so flatten.
            rows.push(row.iter().map(|cell| cell.replace('\n', " ")).collect());
        }
    }
}

/// Fill a letter template from disk and write the result.
pub fn fill_letter(
    template: &Path,
    out: &Path,
    metadata: &CaseMetadata,
    carrier: Carrier,
    records: &[ResolvedRecord],
    today: NaiveDate,
) -> Result<(), ArtifactError> {
    if !template.is_file() {
        return Err(ArtifactError::TemplateMissing(template.to_path_buf()));
    }
    let mut letter = TextLetter::parse(&fs::read_to_string(template)?);
    ipreq_core::fill_letter(&mut letter, metadata, carrier, records, today)
        .map_err(|LetterError::TableNotFound| ArtifactError::TableNotFound)?;
    fs::write(out, letter.render())?;
    info!(out = %out.display(), carrier = %carrier, rows = records.len(), "wrote letter");
    Ok(())
}
