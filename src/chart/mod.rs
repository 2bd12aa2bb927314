//! Status and route charts.
//!
//! Both charts share one location palette and a boxed legend. Inputs are
//! plain JSON (see [`status::StatusChartInput`] and
//! [`route::RouteChartInput`]) and outputs are [`Scene`]s, so they go
//! through the same SVG backend as comparator diagrams.

pub mod route;
pub mod status;

use serde::{Deserialize, Serialize};

use crate::scene::{Scene, Shape, TextAnchor};

/// Known locations in segment priority order, with their fill colors.
pub const LOCATIONS: [(&str, &str); 11] = [
    ("Gravelines", "#FFD700"),
    ("London", "#B0C4DE"),
    ("Gosfield", "#2CA02C"),
    ("Scorton", "#D62728"),
    ("Rouen", "#1F77B4"),
    ("Haggerston", "#FF7F0E"),
    ("Aire", "#E377C2"),
    ("Britwell", "#EAFFEA"),
    ("Plymouth", "#9467BD"),
    ("Dunkirk", "#9ACD32"),
    ("Worcester", "#17BECF"),
];

pub const DECEASED_COLOR: &str = "#808080";
/// Fill for locations outside the palette.
pub const UNKNOWN_COLOR: &str = "#CCCCCC";
/// Legend swatch for the uncertain segment, which has no single color.
pub const UNCERTAIN_SWATCH: &str = "#D3D3D3";

const EDGE_COLOR: &str = "#000000";
const TEXT_COLOR: &str = "#000000";

/// Palette color for a location name, case-insensitive.
#[must_use]
pub fn location_color(name: &str) -> Option<&'static str> {
    LOCATIONS
        .iter()
        .find(|(location, _)| location.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

/// Fills dark enough that labels on them are drawn white.
#[must_use]
pub fn needs_light_text(color: &str) -> bool {
    ["Scorton", "Rouen", "Plymouth", "Worcester"]
        .iter()
        .filter_map(|l| location_color(l))
        .chain(std::iter::once(DECEASED_COLOR))
        .any(|dark| dark.eq_ignore_ascii_case(color))
}

/// A tick spacing giving at most about ten ticks over `0..=span`.
#[must_use]
pub fn tick_step(span: f64) -> f64 {
    if span.is_nan() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / 10.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    step.max(1.0)
}

// =============================================================================
// LEGEND
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    #[default]
    UpperRight,
    LowerRight,
    UpperLeft,
    LowerLeft,
    CenterRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub hatched: bool,
}

/// Plot rectangle a legend is placed inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

const LEGEND_FONT: f64 = 11.0;
const LEGEND_ROW: f64 = 18.0;
const LEGEND_PAD: f64 = 8.0;
const SWATCH_W: f64 = 20.0;
const SWATCH_H: f64 = 10.0;

/// Draw a titled legend box inside `area`.
pub fn push_legend(scene: &mut Scene, entries: &[LegendEntry], area: PlotArea, position: LegendPosition) {
    if entries.is_empty() {
        return;
    }
    let widest = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let width = LEGEND_PAD * 3.0 + SWATCH_W + widest as f64 * LEGEND_FONT * 0.6;
    #[allow(clippy::cast_precision_loss)]
    let height = LEGEND_PAD * 2.0 + LEGEND_ROW * (entries.len() + 1) as f64;

    let x = match position {
        LegendPosition::UpperLeft | LegendPosition::LowerLeft => area.left + LEGEND_PAD,
        _ => area.right - LEGEND_PAD - width,
    };
    let y = match position {
        LegendPosition::UpperRight | LegendPosition::UpperLeft => area.top + LEGEND_PAD,
        LegendPosition::LowerRight | LegendPosition::LowerLeft => area.bottom - LEGEND_PAD - height,
        LegendPosition::CenterRight => f64::midpoint(area.top, area.bottom) - height / 2.0,
    };

    scene.push(Shape::RoundedRect {
        x,
        y,
        width,
        height,
        radius: 4.0,
        fill: "#FFFFFF".into(),
        opacity: 0.9,
        stroke: Some("#BBBBBB".into()),
        stroke_width: 1.0,
    });
    let title_y = y + LEGEND_PAD + LEGEND_FONT;
    scene.push(Shape::label(x + width / 2.0, title_y, "Legend", LEGEND_FONT, TEXT_COLOR, TextAnchor::Middle));

    for (i, entry) in entries.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let row_top = y + LEGEND_PAD + LEGEND_ROW * (i + 1) as f64;
        scene.push(Shape::Rect {
            x: x + LEGEND_PAD,
            y: row_top + (LEGEND_ROW - SWATCH_H) / 2.0,
            width: SWATCH_W,
            height: SWATCH_H,
            fill: entry.color.clone(),
            opacity: 1.0,
            stroke: Some(EDGE_COLOR.into()),
            hatched: entry.hatched,
        });
        scene.push(Shape::label(
            x + LEGEND_PAD * 2.0 + SWATCH_W,
            row_top + LEGEND_ROW / 2.0 + LEGEND_FONT * 0.35,
            &entry.label,
            LEGEND_FONT,
            TEXT_COLOR,
            TextAnchor::Start,
        ));
    }
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
