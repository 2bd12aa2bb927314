//! Identity expansion and views.
//!
//! A merge block in any column glues its identifiers together: showing one
//! of them without the others would cut the card in half. `expand` computes
//! the transitive closure of a seed set over every block of every column;
//! views are built only from closed sets.

use std::collections::BTreeSet;

use super::table::{Block, Column, TableModel};

/// Transitive closure of `seed` over all blocks of all three columns.
///
/// Repeats full passes until one adds nothing. Unknown or empty seeds come
/// back unchanged.
#[must_use]
pub fn expand(seed: &BTreeSet<String>, blocks: &[Vec<Block>; 3]) -> BTreeSet<String> {
    let mut closure = seed.clone();
    loop {
        let mut changed = false;
        for block in blocks.iter().flatten() {
            if !block.ids.iter().any(|id| closure.contains(id)) {
                continue;
            }
            for id in &block.ids {
                if closure.insert(id.clone()) {
                    changed = true;
                }
            }
        }
        if !changed {
            return closure;
        }
    }
}

/// Partition the registry into closed groups, ordered by each group's first
/// identifier in display order.
#[must_use]
pub fn closure_groups(model: &TableModel) -> Vec<Vec<String>> {
    let mut assigned: BTreeSet<String> = BTreeSet::new();
    let mut groups = Vec::new();
    for id in &model.sorted_ids {
        if assigned.contains(id) {
            continue;
        }
        let seed = BTreeSet::from([id.clone()]);
        let closure = expand(&seed, &model.blocks);
        let group: Vec<String> = model
            .sorted_ids
            .iter()
            .filter(|i| closure.contains(*i))
            .cloned()
            .collect();
        assigned.extend(closure);
        groups.push(group);
    }
    groups
}

// =============================================================================
// VIEW
// =============================================================================

/// A filtered projection of one table, ready for layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    /// Visible identifiers in display order.
    pub visible_ids: Vec<String>,
    /// Indices into each column's block sequence, in block order.
    pub visible_blocks: [Vec<usize>; 3],
}

impl View {
    /// Every identifier and every addressable block.
    #[must_use]
    pub fn full(model: &TableModel) -> Self {
        let all: BTreeSet<String> = model.sorted_ids.iter().cloned().collect();
        Self::from_closed_set(model, &all)
    }

    /// The closure of a single identifier. Unknown ids give an empty view.
    #[must_use]
    pub fn filter(model: &TableModel, id: &str) -> Self {
        let seed = BTreeSet::from([id.to_owned()]);
        Self::select(model, &seed)
    }

    /// The closure of a set of identifiers.
    #[must_use]
    pub fn select(model: &TableModel, ids: &BTreeSet<String>) -> Self {
        let closure = expand(ids, &model.blocks);
        Self::from_closed_set(model, &closure)
    }

    fn from_closed_set(model: &TableModel, closure: &BTreeSet<String>) -> Self {
        let visible_ids = model
            .sorted_ids
            .iter()
            .filter(|id| closure.contains(*id))
            .cloned()
            .collect();

        let mut visible_blocks: [Vec<usize>; 3] = Default::default();
        for column in Column::ALL {
            visible_blocks[column.index()] = model
                .column(column)
                .iter()
                .enumerate()
                .filter(|(_, block)| block.ids.iter().any(|id| closure.contains(id)))
                .map(|(i, _)| i)
                .collect();
        }

        Self { visible_ids, visible_blocks }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_ids.is_empty()
    }

    /// Visible blocks of one column with their positions in the full column.
    pub fn blocks<'v, 'm>(
        &'v self,
        model: &'m TableModel,
        column: Column,
    ) -> impl Iterator<Item = (usize, &'m Block)> + use<'v, 'm> {
        let all = model.column(column);
        self.visible_blocks[column.index()]
            .iter()
            .filter_map(move |&i| all.get(i).map(|b| (i, b)))
    }
}

#[cfg(test)]
#[path = "expand_test.rs"]
mod tests;
