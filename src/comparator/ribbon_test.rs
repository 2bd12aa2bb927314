use super::*;
use crate::comparator::cell::parse_cell;
use crate::comparator::expand::View;
use crate::comparator::layout::{LayoutParams, layout};
use crate::comparator::table::{Row, TableModel};

fn anchor(x_left: f64, x_right: f64, y: f64, height: f64) -> Anchor {
    Anchor { left: Point::new(x_left, y), right: Point::new(x_right, y), height }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn polygon_points(shape: &Shape) -> &[Point] {
    match shape {
        Shape::Polygon { points, .. } => points,
        other => panic!("expected polygon, got {}", other.kind()),
    }
}

#[test]
fn ease_is_normalized_and_monotonic() {
    assert!(approx(ease(0.0), 0.0));
    assert!(approx(ease(1.0), 1.0));
    assert!(approx(ease(0.5), 0.5));
    let mut previous = 0.0;
    for i in 1..=100 {
        let v = ease(f64::from(i) / 100.0);
        assert!(v >= previous);
        previous = v;
    }
}

#[test]
fn ease_is_flat_at_the_ends() {
    let start_slope = ease(0.01) / 0.01;
    let middle_slope = (ease(0.51) - ease(0.49)) / 0.02;
    assert!(start_slope < middle_slope / 10.0);
}

#[test]
fn ribbon_runs_from_source_right_to_dest_left() {
    let source = anchor(0.0, 100.0, 50.0, 20.0);
    let dest = anchor(200.0, 300.0, 150.0, 40.0);
    let shape = ribbon(&source, &dest, "#FFD700", 0.35, 0.5);
    let points = polygon_points(&shape);

    assert_eq!(points.len(), 2 * (RIBBON_SAMPLES + 1));
    // Thinner anchor is 20 high; half-thickness is 20 * 0.5 / 2.
    let first = points[0];
    assert!(approx(first.x, 100.0));
    assert!(approx(first.y, 45.0));
    let upper_end = points[RIBBON_SAMPLES];
    assert!(approx(upper_end.x, 200.0));
    assert!(approx(upper_end.y, 145.0));
    let last = points[points.len() - 1];
    assert!(approx(last.x, 100.0));
    assert!(approx(last.y, 55.0));
}

#[test]
fn ribbon_carries_color_and_opacity() {
    let a = anchor(0.0, 10.0, 0.0, 10.0);
    let shape = ribbon(&a, &a, "#B0C4DE", 0.2, 1.0);
    match shape {
        Shape::Polygon { fill, opacity, .. } => {
            assert_eq!(fill, "#B0C4DE");
            assert!(approx(opacity, 0.2));
        }
        other => panic!("unexpected {}", other.kind()),
    }
}

#[test]
fn ribbons_only_join_ids_present_on_both_sides() {
    let rows = vec![
        Row::new(parse_cell("[M] a"), parse_cell("[M] b"), parse_cell("[M] c")),
        Row::new(parse_cell("[O] d"), parse_cell(""), parse_cell("[O] f")),
    ];
    let model = TableModel::build(&rows);
    let view = View::full(&model);
    let params = LayoutParams { font_size: 10.0, wrap_chars: 40, compact: false, marker_inline: false, origin_y: 0.0 };
    let layout = layout(&model, &view, &params);

    let ab = ribbons_between(&layout, &view.visible_ids, Column::A, "#000", 0.3, 0.6);
    assert_eq!(ab.len(), 1);
    let bc = ribbons_between(&layout, &view.visible_ids, Column::B, "#000", 0.3, 0.6);
    assert_eq!(bc.len(), 1);
    assert!(ribbons_between(&layout, &view.visible_ids, Column::C, "#000", 0.3, 0.6).is_empty());
}

#[test]
fn split_slots_connect_every_segment_pair() {
    let rows = vec![
        Row::new(parse_cell("[K] 1. a"), parse_cell("[K] x"), parse_cell("[K] y")),
        Row::new(parse_cell("[K] 2. b"), parse_cell("[K] x"), parse_cell("[K] y")),
    ];
    let model = TableModel::build(&rows);
    let view = View::full(&model);
    let params = LayoutParams { font_size: 10.0, wrap_chars: 40, compact: false, marker_inline: false, origin_y: 0.0 };
    let layout = layout(&model, &view, &params);
    let ab = ribbons_between(&layout, &view.visible_ids, Column::A, "#000", 0.3, 0.6);
    assert_eq!(ab.len(), 2);
}
