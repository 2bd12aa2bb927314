//! SVG backend for [`Scene`].
//!
//! The scene is written in logical canvas units through `viewBox`; only the
//! outer `width`/`height` attributes carry the export scale, so the same
//! scene serializes to any resolution without touching coordinates.

use std::fmt::Write;

use crate::scene::{Point, Scene, Shape, TextAnchor};

const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";
const HATCH_ID: &str = "synoptic-hatch";

/// Serialize a scene. `scale` multiplies the outer pixel size.
///
/// # Errors
///
/// Only if formatting into the output buffer fails.
pub fn render_svg(scene: &Scene, scale: f64) -> Result<String, std::fmt::Error> {
    let mut svg = String::new();
    write!(
        svg,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}" font-family="{FONT_FAMILY}">
"#,
        scene.width * scale,
        scene.height * scale,
        scene.width,
        scene.height,
    )?;

    let hatched = scene
        .shapes
        .iter()
        .any(|s| matches!(s, Shape::Rect { hatched: true, .. }));
    if hatched {
        write!(
            svg,
            concat!(
                "  <defs>\n",
                "    <pattern id=\"{}\" patternUnits=\"userSpaceOnUse\" width=\"6\" height=\"6\" patternTransform=\"rotate(45)\">\n",
                "      <line x1=\"0\" y1=\"0\" x2=\"0\" y2=\"6\" stroke=\"#333333\" stroke-width=\"1\" />\n",
                "    </pattern>\n",
                "  </defs>\n",
            ),
            HATCH_ID
        )?;
    }

    writeln!(svg, "  <rect width=\"100%\" height=\"100%\" fill=\"{}\" />", escape_xml(&scene.background))?;
    for shape in &scene.shapes {
        write_shape(&mut svg, shape)?;
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}

fn write_shape(svg: &mut String, shape: &Shape) -> std::fmt::Result {
    match shape {
        Shape::Rect { x, y, width, height, fill, opacity, stroke, hatched } => {
            writeln!(
                svg,
                "  <rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"{}{} />",
                escape_xml(fill),
                opacity_attr("fill-opacity", *opacity),
                stroke_attr(stroke.as_deref(), 1.0),
            )?;
            if *hatched {
                writeln!(
                    svg,
                    "  <rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"url(#{HATCH_ID})\" />"
                )?;
            }
            Ok(())
        }
        Shape::RoundedRect { x, y, width, height, radius, fill, opacity, stroke, stroke_width } => writeln!(
            svg,
            "  <rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\" fill=\"{}\"{}{} />",
            escape_xml(fill),
            opacity_attr("fill-opacity", *opacity),
            stroke_attr(stroke.as_deref(), *stroke_width),
        ),
        Shape::Polygon { points, fill, opacity } => writeln!(
            svg,
            "  <polygon points=\"{}\" fill=\"{}\"{} />",
            points_attr(points),
            escape_xml(fill),
            opacity_attr("fill-opacity", *opacity),
        ),
        Shape::Line { from, to, stroke, width, dashed } => writeln!(
            svg,
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{width:.2}\"{} />",
            from.x,
            from.y,
            to.x,
            to.y,
            escape_xml(stroke),
            if *dashed { " stroke-dasharray=\"4 3\"" } else { "" },
        ),
        Shape::Text { x, y, lines, font_size, line_height, color, anchor, bold, rotation } => {
            write!(
                svg,
                "  <text x=\"{x:.2}\" y=\"{y:.2}\" font-size=\"{font_size:.2}\" fill=\"{}\" text-anchor=\"{}\"",
                escape_xml(color),
                anchor_attr(*anchor),
            )?;
            if *bold {
                svg.push_str(" font-weight=\"bold\"");
            }
            if rotation.abs() > f64::EPSILON {
                write!(svg, " transform=\"rotate({rotation:.2} {x:.2} {y:.2})\"")?;
            }
            svg.push('>');
            for (i, line) in lines.iter().enumerate() {
                let dy = if i == 0 { 0.0 } else { *line_height };
                write!(svg, "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>", escape_xml(line))?;
            }
            svg.push_str("</text>\n");
            Ok(())
        }
    }
}

fn opacity_attr(name: &str, opacity: f64) -> String {
    if (opacity - 1.0).abs() < f64::EPSILON {
        String::new()
    } else {
        format!(" {name}=\"{opacity:.3}\"")
    }
}

fn stroke_attr(stroke: Option<&str>, width: f64) -> String {
    match stroke {
        Some(color) => format!(" stroke=\"{}\" stroke-width=\"{width:.2}\"", escape_xml(color)),
        None => String::new(),
    }
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for use in SVG attributes and character data.
///
/// Control characters XML 1.0 forbids become spaces.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "svg_test.rs"]
mod tests;
