//! Stacked status bars, one per period.
//!
//! DESIGN
//! ======
//! Each period is a column of raw status codes, one per person. Codes are
//! trimmed and lowercased, then counted:
//! - `x` is uncertain, `z` is deceased
//! - `yes` / `y` are credited to the period's default location, chosen from
//!   its label (`LONDON`, `GOSFIELD`, otherwise Gravelines)
//! - any other code is credited to the first location, in palette order,
//!   whose code list contains it; unknown codes are ignored
//!
//! A location is active when its code list is non-empty. Inactive locations
//! never produce segments or legend entries.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{
    DECEASED_COLOR, LOCATIONS, LegendEntry, LegendPosition, PlotArea, UNCERTAIN_SWATCH, location_color,
    needs_light_text, push_legend, tick_step,
};
use crate::scene::{Point, Scene, Shape, TextAnchor};

const GENERIC_CODES: [&str; 2] = ["yes", "y"];
const UNCERTAIN_CODE: &str = "x";
const DECEASED_CODE: &str = "z";
/// Uncertain segments are drawn in the default location's color at this
/// opacity, hatched.
const UNCERTAIN_ALPHA: f64 = 0.3;
/// Segments narrower than this many units get no value label.
const MIN_LABELED_WIDTH: f64 = 0.8;

/// Built-in code lists per location.
#[must_use]
pub fn default_codes() -> BTreeMap<String, Vec<String>> {
    let table: [(&str, &str); 11] = [
        ("Gravelines", "yes, y, yesg, g, yellow, yesy"),
        ("London", "yesn, london"),
        ("Gosfield", "yesz, gosfield"),
        ("Scorton", "yesc, s, scorton"),
        ("Rouen", "yesr"),
        ("Haggerston", "yesh"),
        ("Aire", "yesa"),
        ("Britwell", "yesb"),
        ("Plymouth", "yesp"),
        ("Dunkirk", "yesd"),
        ("Worcester", "yesw"),
    ];
    table
        .into_iter()
        .map(|(location, codes)| (location.to_owned(), split_codes(codes)))
        .collect()
}

/// Split a comma-separated code list, trimming and lowercasing each code.
#[must_use]
pub fn split_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}

// =============================================================================
// INPUT
// =============================================================================

fn default_title() -> String {
    "Population Status".to_owned()
}

fn default_x_label() -> String {
    "Count".to_owned()
}

fn yes() -> bool {
    true
}

/// One status chart, as read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusChartInput {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_x_label")]
    pub x_label: String,
    pub periods: Vec<Period>,
    /// Location -> accepted codes. Replaces the built-in lists entirely.
    #[serde(default = "default_codes")]
    pub codes: BTreeMap<String, Vec<String>>,
    #[serde(default = "yes")]
    pub show_values: bool,
    #[serde(default = "yes")]
    pub show_total: bool,
    #[serde(default = "yes")]
    pub show_legend: bool,
    #[serde(default)]
    pub legend_position: LegendPosition,
    /// Overrides for legend labels, keyed by location, `Uncertain` or
    /// `Deceased`.
    #[serde(default)]
    pub legend_labels: BTreeMap<String, String>,
}

/// One period: a label and the raw per-person values.
#[derive(Debug, Clone, Deserialize)]
pub struct Period {
    pub label: String,
    /// Strings, numbers or nulls straight from a spreadsheet column.
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

// =============================================================================
// AGGREGATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Alive(&'static str),
    Uncertain,
    Deceased,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub count: u32,
    pub color: String,
    pub opacity: f64,
    pub hatched: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBar {
    pub label: String,
    pub segments: Vec<Segment>,
}

impl PeriodBar {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.segments.iter().map(|s| s.count).sum()
    }
}

/// Location credited with generic `yes`/`y` codes for a period label.
#[must_use]
pub fn default_location(label: &str) -> &'static str {
    let upper = label.to_uppercase();
    if upper.contains("LONDON") {
        "London"
    } else if upper.contains("GOSFIELD") {
        "Gosfield"
    } else {
        "Gravelines"
    }
}

fn normalize_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.trim().to_lowercase(),
        serde_json::Value::Null => String::new(),
        other => other.to_string().trim().to_lowercase(),
    }
}

fn is_active(codes: &BTreeMap<String, Vec<String>>, location: &str) -> bool {
    codes.get(location).is_some_and(|c| !c.is_empty())
}

/// Count one period's codes into ordered segments.
#[must_use]
pub fn aggregate(period: &Period, codes: &BTreeMap<String, Vec<String>>) -> PeriodBar {
    let default = default_location(&period.label);
    let mut alive: BTreeMap<&'static str, u32> = BTreeMap::new();
    let mut uncertain = 0;
    let mut deceased = 0;

    for value in &period.values {
        let code = normalize_value(value);
        if code == UNCERTAIN_CODE {
            uncertain += 1;
        } else if code == DECEASED_CODE {
            deceased += 1;
        } else if GENERIC_CODES.contains(&code.as_str()) {
            *alive.entry(default).or_default() += 1;
        } else if let Some((location, _)) = LOCATIONS.iter().find(|(location, _)| {
            codes
                .get(*location)
                .is_some_and(|list| list.iter().any(|c| *c == code && !GENERIC_CODES.contains(&c.as_str())))
        }) {
            *alive.entry(*location).or_default() += 1;
        }
    }

    let mut segments: Vec<Segment> = LOCATIONS
        .iter()
        .filter(|(location, _)| is_active(codes, location))
        .filter_map(|(location, color)| {
            let count = alive.get(location).copied().filter(|n| *n > 0)?;
            Some(Segment {
                kind: SegmentKind::Alive(*location),
                count,
                color: (*color).to_owned(),
                opacity: 1.0,
                hatched: false,
            })
        })
        .collect();

    if uncertain > 0 {
        segments.push(Segment {
            kind: SegmentKind::Uncertain,
            count: uncertain,
            color: location_color(default).unwrap_or(LOCATIONS[0].1).to_owned(),
            opacity: UNCERTAIN_ALPHA,
            hatched: true,
        });
    }
    if deceased > 0 {
        segments.push(Segment {
            kind: SegmentKind::Deceased,
            count: deceased,
            color: DECEASED_COLOR.to_owned(),
            opacity: 1.0,
            hatched: false,
        });
    }

    PeriodBar { label: period.label.clone(), segments }
}

/// Legend entries: active locations, then uncertain and deceased.
#[must_use]
pub fn legend_entries(input: &StatusChartInput) -> Vec<LegendEntry> {
    let label = |key: &str, fallback: String| {
        input
            .legend_labels
            .get(key)
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map_or(fallback, str::to_owned)
    };
    let mut entries: Vec<LegendEntry> = LOCATIONS
        .iter()
        .filter(|(location, _)| is_active(&input.codes, location))
        .map(|(location, color)| LegendEntry {
            label: label(*location, format!("Alive ({location})")),
            color: (*color).to_owned(),
            hatched: false,
        })
        .collect();
    entries.push(LegendEntry {
        label: label("Uncertain", "Uncertain (x)".to_owned()),
        color: UNCERTAIN_SWATCH.to_owned(),
        hatched: true,
    });
    entries.push(LegendEntry {
        label: label("Deceased", "Deceased (z)".to_owned()),
        color: DECEASED_COLOR.to_owned(),
        hatched: false,
    });
    entries
}

// =============================================================================
// RENDERING
// =============================================================================

const WIDTH: f64 = 1280.0;
const LABEL_AREA: f64 = 220.0;
const RIGHT_PAD: f64 = 40.0;
const TITLE_AREA: f64 = 64.0;
const AXIS_AREA: f64 = 64.0;
const BAND: f64 = 64.0;
/// Bar thickness as a fraction of its band.
const BAR_FILL: f64 = 0.6;
const FONT: f64 = 10.0;

/// Draw the chart.
#[must_use]
pub fn render(input: &StatusChartInput) -> Scene {
    let bars: Vec<PeriodBar> = input
        .periods
        .iter()
        .map(|p| aggregate(p, &input.codes))
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let plot_height = BAND * bars.len().max(1) as f64;
    let area = PlotArea {
        left: LABEL_AREA,
        top: TITLE_AREA,
        right: WIDTH - RIGHT_PAD,
        bottom: TITLE_AREA + plot_height,
    };
    let mut scene = Scene::new(WIDTH, area.bottom + AXIS_AREA);

    let max_total = bars.iter().map(PeriodBar::total).max().unwrap_or(0);
    // Headroom for the "Total: n" label after the longest bar.
    let x_max = f64::from(max_total) * 1.15 + 3.0;
    let unit = (area.right - area.left) / x_max;
    let to_x = |v: f64| area.left + v * unit;

    // ===== GRID AND AXES =====

    let step = tick_step(x_max);
    let mut tick = 0.0;
    while tick <= x_max {
        let x = to_x(tick);
        scene.push(Shape::Line {
            from: Point::new(x, area.top),
            to: Point::new(x, area.bottom),
            stroke: "#CCCCCC".into(),
            width: 1.0,
            dashed: true,
        });
        scene.push(Shape::label(x, area.bottom + 18.0, &format!("{tick}"), FONT, "#000000", TextAnchor::Middle));
        tick += step;
    }
    scene.push(Shape::Line {
        from: Point::new(area.left, area.bottom),
        to: Point::new(area.right, area.bottom),
        stroke: "#000000".into(),
        width: 1.0,
        dashed: false,
    });
    scene.push(Shape::Line {
        from: Point::new(area.left, area.top),
        to: Point::new(area.left, area.bottom),
        stroke: "#000000".into(),
        width: 1.0,
        dashed: false,
    });
    scene.push(Shape::label(
        f64::midpoint(area.left, area.right),
        area.bottom + 44.0,
        &input.x_label,
        FONT * 1.2,
        "#000000",
        TextAnchor::Middle,
    ));
    scene.push(Shape::label(WIDTH / 2.0, 36.0, &input.title, FONT * 1.6, "#000000", TextAnchor::Middle).bold());

    // ===== BARS =====

    for (i, bar) in bars.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let center = area.top + BAND * (i as f64 + 0.5);
        push_period_label(&mut scene, &bar.label, area.left - 8.0, center);

        let bar_h = BAND * BAR_FILL;
        let mut left = 0.0;
        for segment in &bar.segments {
            let width = f64::from(segment.count);
            scene.push(Shape::Rect {
                x: to_x(left),
                y: center - bar_h / 2.0,
                width: width * unit,
                height: bar_h,
                fill: segment.color.clone(),
                opacity: segment.opacity,
                stroke: Some("#000000".into()),
                hatched: segment.hatched,
            });
            if input.show_values && width >= MIN_LABELED_WIDTH {
                let color = if needs_light_text(&segment.color) { "#FFFFFF" } else { "#000000" };
                let value = segment.count.to_string();
                let x = to_x(left + width / 2.0);
                scene.push(Shape::label(x, center + FONT * 0.35, &value, FONT, color, TextAnchor::Middle).bold());
            }
            left += width;
        }

        if input.show_total {
            let text = format!("Total: {}", bar.total());
            let x = to_x(left + 0.5);
            scene.push(Shape::label(x, center + FONT * 0.35, &text, FONT * 1.1, "#000000", TextAnchor::Start).bold());
        }
    }

    if input.show_legend {
        push_legend(&mut scene, &legend_entries(input), area, input.legend_position);
    }

    tracing::debug!(periods = bars.len(), max_total, "rendered status chart");
    scene
}

fn push_period_label(scene: &mut Scene, label: &str, x: f64, center: f64) {
    let lines: Vec<String> = label.lines().map(str::to_owned).collect();
    let line_height = FONT * 1.25;
    #[allow(clippy::cast_precision_loss)]
    let first = center - (lines.len().saturating_sub(1) as f64) * line_height / 2.0 + FONT * 0.35;
    scene.push(Shape::Text {
        x,
        y: first,
        lines,
        font_size: FONT,
        line_height,
        color: "#000000".into(),
        anchor: TextAnchor::End,
        bold: false,
        rotation: 0.0,
    });
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
