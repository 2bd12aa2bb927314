//! Layout engine: slot heights, vertical spans, cards and ribbon anchors.
//!
//! DESIGN
//! ======
//! Every visible identifier owns one horizontal slot shared by all three
//! columns. A slot is as tall as the tallest block text that references the
//! id, where a merge block's line count is divided across the ids it covers.
//! Slots are stacked top to bottom in display order with a fixed gap.
//!
//! Blocks are then placed against the slots:
//! - a multi-id block runs from the top of its first slot to the bottom of
//!   its last slot;
//! - several single-id blocks for the same id in one column split that slot
//!   into equal parts, ranked by their order in the column.
//!
//! Cards are the drawn rectangles: the block extent shrunk by `CARD_GAP` at
//! both ends. Anchors divide each card evenly among its ids and are the
//! endpoints ribbons attach to.

use std::borrow::Cow;
use std::collections::HashMap;

use super::expand::View;
use super::table::{Block, Column, TableModel};
use crate::config::DiagramConfig;
use crate::consts::{
    CARD_GAP, COLUMN_WIDTH, COMPACT_ROW_GAP, LINE_HEIGHT_FACTOR, MIN_CARD_HEIGHT, MIN_ROW_HEIGHT, ROW_GAP,
    ROW_PADDING, column_left,
};
use crate::scene::Point;
use crate::text::wrapped_line_count;

/// Inputs to the layout that come from the diagram configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub font_size: f64,
    pub wrap_chars: usize,
    pub compact: bool,
    /// Markers are drawn in front of the body text instead of on a stripe.
    pub marker_inline: bool,
    /// Canvas y of the first slot's top edge.
    pub origin_y: f64,
}

impl LayoutParams {
    #[must_use]
    pub fn from_config(config: &DiagramConfig, origin_y: f64) -> Self {
        Self {
            font_size: config.font_size,
            wrap_chars: config.wrap_chars,
            compact: config.compact,
            marker_inline: config.show_markers && !config.show_stripe,
            origin_y,
        }
    }

    /// Height of one wrapped text line at this font size.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        LINE_HEIGHT_FACTOR * self.font_size / 10.0
    }

    fn row_gap(&self) -> f64 {
        if self.compact { COMPACT_ROW_GAP } else { ROW_GAP }
    }
}

/// A vertical span; `top < bottom` in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

impl Span {
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        f64::midpoint(self.top, self.bottom)
    }

    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.top < other.bottom && other.top < self.bottom
    }
}

/// One drawn block.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub column: Column,
    /// Position of the block in its column's full block sequence.
    pub block_index: usize,
    /// Span the block occupies before the visual gap.
    pub extent: Span,
    /// Span actually drawn.
    pub rect: Span,
}

/// Ribbon attachment point for one id segment of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub left: Point,
    pub right: Point,
    pub height: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub slot_heights: HashMap<String, f64>,
    pub y_positions: HashMap<String, Span>,
    pub cards: Vec<Card>,
    pub anchors: HashMap<(Column, String), Vec<Anchor>>,
    pub total_height: f64,
}

impl Layout {
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<Span> {
        self.y_positions.get(id).copied()
    }

    #[must_use]
    pub fn anchors_for(&self, column: Column, id: &str) -> &[Anchor] {
        self.anchors
            .get(&(column, id.to_owned()))
            .map_or(&[], Vec::as_slice)
    }
}

/// Lay out one view of a table.
#[must_use]
pub fn layout(model: &TableModel, view: &View, params: &LayoutParams) -> Layout {
    let slot_heights = slot_heights(model, view, params);

    let mut y_positions = HashMap::new();
    let mut cursor = params.origin_y;
    let mut last_bottom = params.origin_y;
    for (i, id) in view.visible_ids.iter().enumerate() {
        if i > 0 {
            cursor += params.row_gap();
        }
        let height = slot_heights.get(id).copied().unwrap_or(MIN_ROW_HEIGHT);
        let span = Span { top: cursor, bottom: cursor + height };
        y_positions.insert(id.clone(), span);
        cursor = span.bottom;
        last_bottom = span.bottom;
    }
    let total_height = (last_bottom - params.origin_y).abs();

    let mut cards = Vec::new();
    let mut anchors: HashMap<(Column, String), Vec<Anchor>> = HashMap::new();
    for column in Column::ALL {
        let siblings = single_id_siblings(model, view, column);
        for (block_index, block) in view.blocks(model, column) {
            let Some(extent) = block_extent(model, block, block_index, &y_positions, &siblings) else {
                continue;
            };
            let rect = card_span(extent);
            push_anchors(model, block, column, rect, &mut anchors);
            cards.push(Card { column, block_index, extent, rect });
        }
    }

    Layout { slot_heights, y_positions, cards, anchors, total_height }
}

/// Body text as drawn on the card, with an inline marker when there is no stripe.
#[must_use]
pub fn display_text<'b>(block: &'b Block, params: &LayoutParams) -> Cow<'b, str> {
    if params.marker_inline && !block.marker.is_empty() {
        Cow::Owned(format!("{} {}", block.marker, block.text))
    } else {
        Cow::Borrowed(&block.text)
    }
}

/// Height one block asks of each id it covers.
#[must_use]
pub fn block_slot_demand(block: &Block, params: &LayoutParams) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let lines = wrapped_line_count(&display_text(block, params), params.wrap_chars) as f64;
    #[allow(clippy::cast_precision_loss)]
    let share = lines / block.ids.len().max(1) as f64;
    f64::max(MIN_ROW_HEIGHT, share * params.line_height() + ROW_PADDING)
}

fn slot_heights(model: &TableModel, view: &View, params: &LayoutParams) -> HashMap<String, f64> {
    let mut heights: HashMap<String, f64> = view
        .visible_ids
        .iter()
        .map(|id| (id.clone(), MIN_ROW_HEIGHT))
        .collect();
    for column in Column::ALL {
        for (_, block) in view.blocks(model, column) {
            let demand = block_slot_demand(block, params);
            for id in &block.ids {
                if let Some(h) = heights.get_mut(id) {
                    *h = h.max(demand);
                }
            }
        }
    }
    heights
}

/// For one column: id -> visible single-id block indices, in block order.
fn single_id_siblings<'a>(model: &'a TableModel, view: &View, column: Column) -> HashMap<&'a str, Vec<usize>> {
    let mut siblings: HashMap<&str, Vec<usize>> = HashMap::new();
    for (block_index, block) in view.blocks(model, column) {
        if let [only] = block.ids.as_slice() {
            siblings.entry(only.as_str()).or_default().push(block_index);
        }
    }
    siblings
}

fn block_extent(
    model: &TableModel,
    block: &Block,
    block_index: usize,
    y_positions: &HashMap<String, Span>,
    siblings: &HashMap<&str, Vec<usize>>,
) -> Option<Span> {
    let spans: Vec<Span> = model
        .ordered_ids(block)
        .into_iter()
        .filter_map(|id| y_positions.get(id).copied())
        .collect();

    match (block.ids.as_slice(), spans.as_slice()) {
        ([only], [slot]) => {
            let group = siblings.get(only.as_str()).map_or(&[][..], Vec::as_slice);
            let count = group.len().max(1);
            let rank = group.iter().position(|&i| i == block_index).unwrap_or(0);
            #[allow(clippy::cast_precision_loss)]
            let share = slot.height() / count as f64;
            #[allow(clippy::cast_precision_loss)]
            let top = slot.top + rank as f64 * share;
            Some(Span { top, bottom: top + share })
        }
        (_, [first, .., last]) => Some(Span { top: first.top, bottom: last.bottom }),
        (_, [slot]) => Some(*slot),
        (_, []) => None,
    }
}

/// Shrink an extent by the card gap, keeping a minimum visible height.
#[must_use]
pub fn card_span(extent: Span) -> Span {
    let top = extent.top + CARD_GAP;
    let bottom = extent.bottom - CARD_GAP;
    if bottom - top < MIN_CARD_HEIGHT {
        let center = extent.center();
        return Span { top: center - MIN_CARD_HEIGHT / 2.0, bottom: center + MIN_CARD_HEIGHT / 2.0 };
    }
    Span { top, bottom }
}

fn push_anchors(
    model: &TableModel,
    block: &Block,
    column: Column,
    rect: Span,
    anchors: &mut HashMap<(Column, String), Vec<Anchor>>,
) {
    let ids = model.ordered_ids(block);
    if ids.is_empty() {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let segment = rect.height() / ids.len() as f64;
    let left_x = column_left(column.index());
    let right_x = left_x + COLUMN_WIDTH;
    for (k, id) in ids.into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let mid = rect.top + (k as f64 + 0.5) * segment;
        anchors.entry((column, id.to_owned())).or_default().push(Anchor {
            left: Point::new(left_x, mid),
            right: Point::new(right_x, mid),
            height: segment,
        });
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
