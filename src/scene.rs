//! Drawing primitives.
//!
//! Layout and chart code emit a [`Scene`]: a flat, back-to-front list of
//! shapes in logical canvas coordinates (y grows downward). Backends such as
//! [`crate::svg`] turn a scene into output without knowing anything about
//! comparator tables or charts.

use serde::Serialize;

/// A point in logical canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal text alignment relative to the text's `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        opacity: f64,
        stroke: Option<String>,
        /// Diagonal hatching over the fill.
        hatched: bool,
    },
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: String,
        opacity: f64,
        stroke: Option<String>,
        stroke_width: f64,
    },
    Text {
        x: f64,
        /// Baseline of the first line.
        y: f64,
        lines: Vec<String>,
        font_size: f64,
        line_height: f64,
        color: String,
        anchor: TextAnchor,
        bold: bool,
        /// Clockwise rotation in degrees around `(x, y)`.
        rotation: f64,
    },
    Polygon {
        points: Vec<Point>,
        fill: String,
        opacity: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: String,
        width: f64,
        dashed: bool,
    },
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::RoundedRect { .. } => "rounded_rect",
            Self::Text { .. } => "text",
            Self::Polygon { .. } => "polygon",
            Self::Line { .. } => "line",
        }
    }

    /// Plain filled rectangle.
    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64, fill: &str) -> Self {
        Self::Rect { x, y, width, height, fill: fill.to_owned(), opacity: 1.0, stroke: None, hatched: false }
    }

    /// Same shape with bold text. Non-text shapes are returned unchanged.
    #[must_use]
    pub fn bold(mut self) -> Self {
        if let Self::Text { bold, .. } = &mut self {
            *bold = true;
        }
        self
    }

    /// Single-line text.
    #[must_use]
    pub fn label(x: f64, y: f64, text: &str, font_size: f64, color: &str, anchor: TextAnchor) -> Self {
        Self::Text {
            x,
            y,
            lines: vec![text.to_owned()],
            font_size,
            line_height: font_size * 1.25,
            color: color.to_owned(),
            anchor,
            bold: false,
            rotation: 0.0,
        }
    }
}

/// A complete drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: String,
    pub shapes: Vec<Shape>,
}

impl Scene {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, background: "#FFFFFF".into(), shapes: Vec::new() }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Number of shapes of a given serialized kind, e.g. `"polygon"`.
    #[must_use]
    pub fn count_kind(&self, kind: &str) -> usize {
        self.shapes.iter().filter(|s| s.kind() == kind).count()
    }
}
