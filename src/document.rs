//! Source document ingestion.
//!
//! A source document is JSON of the form
//! `{"tables": [{"rows": [["cell", "cell", "cell"], ...]}, ...]}`. Only
//! tables whose first row names a subject (`PSALM <n>`, any case) are
//! comparator tables; everything else is skipped. Within a table:
//! - the subject row itself is not data
//! - rows with fewer than three cells are skipped, extra cells ignored
//! - repeated sub-header rows (first two cells both header sentinels) are
//!   skipped

use serde::Deserialize;

use crate::comparator::{Row, TableModel, parse_cell};
use crate::config::DiagramConfig;
use crate::error::SynopticError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub tables: Vec<SourceTable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceTable {
    /// Cells may be `null` for empty positions.
    #[serde(default)]
    pub rows: Vec<Vec<Option<String>>>,
}

/// One recognized comparator table.
#[derive(Debug, Clone)]
pub struct ComparatorTable {
    /// Heading as displayed, e.g. `PSALM 9`.
    pub subject: String,
    pub number: u32,
    /// Index of the table in the source document, counting skipped ones.
    pub source_index: usize,
    pub model: TableModel,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub tables: Vec<ComparatorTable>,
}

impl ParsedDocument {
    /// Recognized table by position among recognized tables.
    ///
    /// # Errors
    ///
    /// [`SynopticError::NoTables`] for a document without comparator tables,
    /// [`SynopticError::TableNotFound`] for an index past the end.
    pub fn table(&self, index: usize) -> Result<&ComparatorTable, SynopticError> {
        if self.tables.is_empty() {
            return Err(SynopticError::NoTables);
        }
        self.tables
            .get(index)
            .ok_or(SynopticError::TableNotFound { index, available: self.tables.len() })
    }
}

/// Parse a JSON source document into comparator tables.
///
/// # Errors
///
/// Returns [`SynopticError::Json`] when the bytes are not a valid document.
pub fn parse_document(bytes: &[u8], config: &DiagramConfig) -> Result<ParsedDocument, SynopticError> {
    let source: SourceDocument = serde_json::from_slice(bytes)?;
    let mut tables = Vec::new();

    for (source_index, table) in source.tables.iter().enumerate() {
        let Some(number) = table.rows.first().and_then(|row| subject_number(row)) else {
            tracing::debug!(source_index, "skipping table without subject heading");
            continue;
        };

        let rows: Vec<Row> = table.rows[1..]
            .iter()
            .filter(|row| keep_row(row, config))
            .map(|row| Row::new(parse_cell(cell(row, 0)), parse_cell(cell(row, 1)), parse_cell(cell(row, 2))))
            .collect();

        let model = TableModel::build(&rows);
        tracing::debug!(source_index, number, rows = rows.len(), ids = model.sorted_ids.len(), "parsed table");
        tables.push(ComparatorTable { subject: format!("PSALM {number}"), number, source_index, model });
    }

    Ok(ParsedDocument { tables })
}

fn cell(row: &[Option<String>], index: usize) -> &str {
    row.get(index).and_then(Option::as_deref).unwrap_or("")
}

fn keep_row(row: &[Option<String>], config: &DiagramConfig) -> bool {
    if row.len() < 3 {
        return false;
    }
    !(config.is_header_sentinel(cell(row, 0)) && config.is_header_sentinel(cell(row, 1)))
}

/// The subject number named by any cell of a heading row.
fn subject_number(row: &[Option<String>]) -> Option<u32> {
    row.iter().flatten().find_map(|c| find_subject(c))
}

/// Find `PSALM <digits>` anywhere in `text`, ignoring case.
#[must_use]
pub fn find_subject(text: &str) -> Option<u32> {
    const TOKEN: &str = "PSALM";
    let upper = text.to_ascii_uppercase();
    let mut from = 0;
    while let Some(pos) = upper[from..].find(TOKEN) {
        let after = &upper[from + pos + TOKEN.len()..];
        let digits: String = after
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        let spaced = after.len() > after.trim_start().len();
        if spaced {
            if let Ok(n) = digits.parse() {
                return Some(n);
            }
        }
        from += pos + TOKEN.len();
    }
    None
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
