//! Row/block builder: turns a table of parsed cells into the identifier
//! registry and the per-column deduplicated block sequences.
//!
//! DESIGN
//! ======
//! Identifier order is first-occurrence order (rows top to bottom, columns
//! A, B, C within a row), never alphabetical: it mirrors the reading order of
//! the source edition. Blocks are deduplicated per column on the exact
//! `(ids, marker, text)` triple, so a merge cell repeated across the rows it
//! spans collapses into one displayed card.
//!
//! Tables in which no cell carries an identifier are repaired by assigning
//! synthetic ids `1..=N`, one per row, identical across the three columns.

use std::collections::{HashMap, HashSet};

use super::cell::ParsedCell;

// =============================================================================
// COLUMN
// =============================================================================

/// One of the three parallel columns of a comparator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    A,
    B,
    C,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::A, Column::B, Column::C];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// The column to the right, if any.
    #[must_use]
    pub fn next(self) -> Option<Column> {
        match self {
            Self::A => Some(Self::B),
            Self::B => Some(Self::C),
            Self::C => None,
        }
    }
}

// =============================================================================
// ROW / BLOCK
// =============================================================================

/// One source row: the parsed A, B and C cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub cells: [ParsedCell; 3],
}

impl Row {
    #[must_use]
    pub fn new(a: ParsedCell, b: ParsedCell, c: ParsedCell) -> Self {
        Self { cells: [a, b, c] }
    }
}

/// A deduplicated display unit within one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    pub ids: Vec<String>,
    pub marker: String,
    pub text: String,
}

impl Block {
    /// Whether this block stands for more than one identifier.
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.ids.len() > 1
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }
}

// =============================================================================
// TABLE MODEL
// =============================================================================

/// Identifier registry plus per-column blocks for one table.
#[derive(Debug, Clone, Default)]
pub struct TableModel {
    /// Canonical display order.
    pub sorted_ids: Vec<String>,
    /// Blocks per column, in first-occurrence order.
    pub blocks: [Vec<Block>; 3],
    pub id_to_index: HashMap<String, usize>,
    /// True when synthetic ids were assigned because the table had none.
    pub repaired: bool,
}

impl TableModel {
    /// Build the registry and blocks from parsed rows.
    #[must_use]
    pub fn build(rows: &[Row]) -> Self {
        let mut sorted_ids: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for row in rows {
            for cell in &row.cells {
                for id in &cell.ids {
                    if seen.insert(id.as_str()) {
                        sorted_ids.push(id.clone());
                    }
                }
            }
        }

        let repaired = sorted_ids.is_empty() && !rows.is_empty();
        if repaired {
            tracing::warn!(rows = rows.len(), "table has no identifiers; assigning sequential ids");
            sorted_ids = (1..=rows.len()).map(|n| n.to_string()).collect();
        }

        let mut blocks: [Vec<Block>; 3] = Default::default();
        for column in Column::ALL {
            let mut dedup: HashSet<Block> = HashSet::new();
            for (row_idx, row) in rows.iter().enumerate() {
                let cell = &row.cells[column.index()];
                let ids = if repaired {
                    vec![sorted_ids[row_idx].clone()]
                } else if cell.ids.is_empty() {
                    continue;
                } else {
                    cell.ids.clone()
                };
                let block = Block { ids, marker: cell.marker.clone(), text: cell.body.clone() };
                if dedup.insert(block.clone()) {
                    blocks[column.index()].push(block);
                }
            }
        }

        let id_to_index = sorted_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Self { sorted_ids, blocks, id_to_index, repaired }
    }

    #[must_use]
    pub fn column(&self, column: Column) -> &[Block] {
        &self.blocks[column.index()]
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// A block's ids ordered by display position. Unknown ids sort last.
    #[must_use]
    pub fn ordered_ids<'a>(&self, block: &'a Block) -> Vec<&'a str> {
        let mut ids: Vec<&str> = block.ids.iter().map(String::as_str).collect();
        ids.sort_by_key(|id| self.index_of(id).unwrap_or(usize::MAX));
        ids
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
