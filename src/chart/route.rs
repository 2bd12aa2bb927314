//! Route timelines: where one group lived, year by year.
//!
//! Each route is drawn as a row of colored spans on a shared year axis.
//! Spans never overlap visually: a span starts at its own start year or where
//! the previous span was drawn to end, whichever is later, and is at least
//! [`MIN_SPAN_YEARS`] wide so one-year stays stay visible.

use serde::Deserialize;

use super::{UNKNOWN_COLOR, location_color};
use crate::error::SynopticError;
use crate::scene::{Point, Scene, Shape, TextAnchor};

pub const DEFAULT_X_LIMITS: (f64, f64) = (1790.0, 1860.0);
pub const MIN_SPAN_YEARS: f64 = 0.6;
/// Spans narrower than this (in years) get a rotated, place-only label.
pub const ROTATE_BELOW_YEARS: f64 = 4.0;
pub const TICK_YEARS: f64 = 10.0;
pub const MAX_SPAN_YEARS: f64 = 1000.0;

/// A year as written in the source: a number, or `"1807/1808"` for an
/// uncertain year between two.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(f64),
    Text(String),
}

impl Year {
    /// Numeric value; `"a/b"` is the midpoint of `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`SynopticError::InvalidYear`] for text that is neither.
    pub fn value(&self) -> Result<f64, SynopticError> {
        let invalid = || SynopticError::InvalidYear(self.to_string());
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) => match text.split_once('/') {
                Some((a, b)) => {
                    let a: f64 = a.trim().parse().map_err(|_| invalid())?;
                    let b: f64 = b.trim().parse().map_err(|_| invalid())?;
                    Ok(f64::midpoint(a, b))
                }
                None => text.trim().parse().map_err(|_| invalid()),
            },
        }
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) if n.fract().abs() < f64::EPSILON => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteEvent {
    pub location: String,
    pub start: Year,
    pub end: Year,
    /// Palette key when it differs from the displayed location.
    #[serde(default)]
    pub color_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub title: String,
    pub events: Vec<RouteEvent>,
}

fn default_limits() -> (f64, f64) {
    DEFAULT_X_LIMITS
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteChartInput {
    pub routes: Vec<Route>,
    #[serde(default = "default_limits")]
    pub x_limits: (f64, f64),
}

/// One span as it will be drawn, in years.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSpan {
    pub start: f64,
    pub width: f64,
    pub color: String,
    pub label: String,
    /// Whether the label is drawn vertically.
    pub rotated: bool,
}

/// Place a route's events left to right without overlap.
///
/// # Errors
///
/// [`SynopticError::InvalidYear`] if any year cannot be read.
pub fn place_spans(route: &Route, x_limits: (f64, f64)) -> Result<Vec<PlacedSpan>, SynopticError> {
    let mut cursor = x_limits.0;
    let mut spans = Vec::with_capacity(route.events.len());
    for event in &route.events {
        let start = event.start.value()?;
        let end = event.end.value()?;
        let visual_start = start.max(cursor);
        let width = (end - start).max(MIN_SPAN_YEARS);
        cursor = visual_start + width;

        let color_key = event.color_key.as_deref().unwrap_or(&event.location);
        let rotated = width < ROTATE_BELOW_YEARS;
        // Equal endpoints always give a minimum-width, rotated span.
        let label = if rotated {
            event.location.clone()
        } else {
            format!("{}\n{}–{}", event.location, event.start, event.end)
        };

        spans.push(PlacedSpan {
            start: visual_start,
            width,
            color: location_color(color_key).unwrap_or(UNKNOWN_COLOR).to_owned(),
            label,
            rotated,
        });
    }
    Ok(spans)
}

// =============================================================================
// RENDERING
// =============================================================================

const WIDTH: f64 = 1200.0;
const PANEL_HEIGHT: f64 = 240.0;
const SIDE: f64 = 40.0;
const TITLE_BAND: f64 = 48.0;
const BAR_HEIGHT: f64 = 120.0;

/// Draw every route as a stacked panel.
///
/// # Errors
///
/// [`SynopticError::InvalidLimits`] for an empty, reversed or oversized
/// year range, and [`SynopticError::InvalidYear`] if any year cannot be read.
pub fn render(input: &RouteChartInput) -> Result<Scene, SynopticError> {
    check_limits(input.x_limits)?;
    #[allow(clippy::cast_precision_loss)]
    let height = PANEL_HEIGHT * input.routes.len().max(1) as f64;
    let mut scene = Scene::new(WIDTH, height);
    for (i, route) in input.routes.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let top = PANEL_HEIGHT * i as f64;
        push_route(&mut scene, route, input.x_limits, top)?;
    }
    tracing::debug!(routes = input.routes.len(), "rendered route chart");
    Ok(scene)
}

fn check_limits((lo, hi): (f64, f64)) -> Result<(), SynopticError> {
    let span = hi - lo;
    if span.is_finite() && span > 0.0 && span <= MAX_SPAN_YEARS {
        Ok(())
    } else {
        Err(SynopticError::InvalidLimits { lo, hi, max: MAX_SPAN_YEARS })
    }
}

fn push_route(scene: &mut Scene, route: &Route, x_limits: (f64, f64), top: f64) -> Result<(), SynopticError> {
    let (lo, hi) = x_limits;
    let unit = (WIDTH - 2.0 * SIDE) / (hi - lo);
    let to_x = |year: f64| SIDE + (year - lo) * unit;
    let bar_top = top + TITLE_BAND;
    let bar_bottom = bar_top + BAR_HEIGHT;
    let center_y = f64::midpoint(bar_top, bar_bottom);

    scene.push(Shape::label(WIDTH / 2.0, top + 30.0, &route.title, 16.0, "#000000", TextAnchor::Middle));

    for span in place_spans(route, x_limits)? {
        let x = to_x(span.start);
        scene.push(Shape::Rect {
            x,
            y: bar_top,
            width: span.width * unit,
            height: BAR_HEIGHT,
            fill: span.color,
            opacity: 1.0,
            stroke: Some("#000000".into()),
            hatched: false,
        });
        let center_x = x + span.width * unit / 2.0;
        if span.rotated {
            scene.push(Shape::Text {
                x: center_x,
                y: center_y,
                lines: vec![span.label],
                font_size: 10.0,
                line_height: 12.5,
                color: "#000000".into(),
                anchor: TextAnchor::Middle,
                bold: false,
                rotation: -90.0,
            });
        } else {
            let lines: Vec<String> = span.label.lines().map(str::to_owned).collect();
            #[allow(clippy::cast_precision_loss)]
            let first = center_y - (lines.len().saturating_sub(1) as f64) * 13.75 / 2.0 + 4.0;
            scene.push(Shape::Text {
                x: center_x,
                y: first,
                lines,
                font_size: 11.0,
                line_height: 13.75,
                color: "#000000".into(),
                anchor: TextAnchor::Middle,
                bold: false,
                rotation: 0.0,
            });
        }
    }

    scene.push(Shape::Line {
        from: Point::new(to_x(lo), bar_bottom),
        to: Point::new(to_x(hi), bar_bottom),
        stroke: "#000000".into(),
        width: 1.0,
        dashed: false,
    });
    let mut year = lo;
    while year <= hi {
        let x = to_x(year);
        scene.push(Shape::Line {
            from: Point::new(x, bar_bottom),
            to: Point::new(x, bar_bottom + 5.0),
            stroke: "#000000".into(),
            width: 1.0,
            dashed: false,
        });
        scene.push(Shape::label(x, bar_bottom + 18.0, &format!("{year:.0}"), 11.0, "#000000", TextAnchor::Middle));
        year += TICK_YEARS;
    }
    scene.push(Shape::label(WIDTH / 2.0, bar_bottom + 40.0, "Years", 12.0, "#000000", TextAnchor::Middle));
    Ok(())
}

#[cfg(test)]
#[path = "route_test.rs"]
mod tests;
