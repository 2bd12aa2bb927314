//! Sigmoid ribbons between matched anchors in adjacent columns.

use super::layout::{Anchor, Layout};
use super::table::Column;
use crate::consts::{RIBBON_SAMPLES, RIBBON_STEEPNESS};
use crate::scene::{Point, Shape};

/// Logistic curve rescaled so that `ease(0) == 0` and `ease(1) == 1`.
#[must_use]
pub fn ease(t: f64) -> f64 {
    let raw = |t: f64| 1.0 / (1.0 + (-RIBBON_STEEPNESS * (t - 0.5)).exp());
    let (lo, hi) = (raw(0.0), raw(1.0));
    (raw(t.clamp(0.0, 1.0)) - lo) / (hi - lo)
}

/// Filled band from `source`'s right edge to `dest`'s left edge.
///
/// The centerline follows [`ease`] in y, so the band leaves and arrives
/// horizontally. Thickness is the thinner anchor's height times
/// `width_scale`.
#[must_use]
pub fn ribbon(source: &Anchor, dest: &Anchor, color: &str, alpha: f64, width_scale: f64) -> Shape {
    let from = source.right;
    let to = dest.left;
    let half = source.height.min(dest.height) * width_scale / 2.0;

    let centerline: Vec<Point> = (0..=RIBBON_SAMPLES)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / RIBBON_SAMPLES as f64;
            Point::new(from.x + t * (to.x - from.x), from.y + ease(t) * (to.y - from.y))
        })
        .collect();

    let mut points: Vec<Point> = centerline.iter().map(|p| Point::new(p.x, p.y - half)).collect();
    points.extend(centerline.iter().rev().map(|p| Point::new(p.x, p.y + half)));

    Shape::Polygon { points, fill: color.to_owned(), opacity: alpha }
}

/// Every ribbon between `column` and the column to its right, in id order.
///
/// An id split into several anchors on either side is connected pairwise,
/// so each source segment reaches each destination segment.
#[must_use]
pub fn ribbons_between(
    layout: &Layout,
    ids: &[String],
    column: Column,
    color: &str,
    alpha: f64,
    width_scale: f64,
) -> Vec<Shape> {
    let Some(next) = column.next() else {
        return Vec::new();
    };
    let mut shapes = Vec::new();
    for id in ids {
        let sources = layout.anchors_for(column, id);
        let dests = layout.anchors_for(next, id);
        for source in sources {
            for dest in dests {
                shapes.push(ribbon(source, dest, color, alpha, width_scale));
            }
        }
    }
    shapes
}

#[cfg(test)]
#[path = "ribbon_test.rs"]
mod tests;
