//! Shared numeric constants for the comparator canvas.
//!
//! All values are logical canvas units (96 per inch); the SVG backend scales
//! them by the configured export resolution.

// ── Canvas geometry ─────────────────────────────────────────────

/// Width reserved left of column A for per-id row labels.
pub const LEFT_MARGIN: f64 = 56.0;

/// Width of each of the three columns.
pub const COLUMN_WIDTH: f64 = 320.0;

/// Horizontal space between columns, where ribbons run.
pub const COLUMN_GAP: f64 = 96.0;

/// Space right of column C.
pub const RIGHT_MARGIN: f64 = 24.0;

/// Space above the first slot when the title/header is hidden.
pub const TOP_MARGIN: f64 = 16.0;

/// Space above the first slot when the title/header is shown.
pub const HEADER_HEIGHT: f64 = 84.0;

/// Space below the last slot.
pub const BOTTOM_MARGIN: f64 = 16.0;

// ── Slot sizing ─────────────────────────────────────────────────

/// Lower bound for any identifier's slot height.
pub const MIN_ROW_HEIGHT: f64 = 36.0;

/// Height of one wrapped text line at font size 10.
pub const LINE_HEIGHT_FACTOR: f64 = 14.0;

/// Vertical padding added to every text-driven slot height.
pub const ROW_PADDING: f64 = 16.0;

/// Gap between consecutive slots.
pub const ROW_GAP: f64 = 10.0;

/// Gap between consecutive slots in compact mode.
pub const COMPACT_ROW_GAP: f64 = 4.0;

// ── Cards ───────────────────────────────────────────────────────

/// Shrink applied to both ends of every drawn card.
pub const CARD_GAP: f64 = 3.0;

/// Smallest drawn card height; shorter cards are centered and grown.
pub const MIN_CARD_HEIGHT: f64 = 8.0;

pub const CARD_RADIUS: f64 = 6.0;
pub const CARD_SHADOW_OFFSET: f64 = 2.0;
pub const CARD_TEXT_INSET: f64 = 8.0;
pub const STRIPE_WIDTH: f64 = 22.0;

// ── Ribbons ─────────────────────────────────────────────────────

/// Points sampled along each ribbon edge.
pub const RIBBON_SAMPLES: usize = 48;

/// Logistic steepness; larger values give flatter ends and a steeper middle.
pub const RIBBON_STEEPNESS: f64 = 10.0;

/// X coordinate of a column's left edge.
#[must_use]
pub fn column_left(index: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let offset = index as f64 * (COLUMN_WIDTH + COLUMN_GAP);
    LEFT_MARGIN + offset
}

/// Total canvas width for the three-column layout.
#[must_use]
pub fn canvas_width() -> f64 {
    column_left(2) + COLUMN_WIDTH + RIGHT_MARGIN
}
