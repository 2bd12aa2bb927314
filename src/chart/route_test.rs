use serde_json::json;

use super::*;

fn route(events: serde_json::Value) -> Route {
    serde_json::from_value(json!({ "title": "T", "events": events })).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn slash_years_are_midpoints() {
    assert!(approx(Year::Text("1807/1808".into()).value().unwrap(), 1807.5));
    assert!(approx(Year::Text(" 1813 ".into()).value().unwrap(), 1813.0));
    assert!(approx(Year::Number(1795.0).value().unwrap(), 1795.0));
    assert!(matches!(Year::Text("soon".into()).value(), Err(SynopticError::InvalidYear(_))));
    assert!(Year::Text("1807/later".into()).value().is_err());
}

#[test]
fn years_display_as_written() {
    assert_eq!(Year::Number(1795.0).to_string(), "1795");
    assert_eq!(Year::Text("1807/1808".into()).to_string(), "1807/1808");
}

#[test]
fn spans_never_overlap_and_have_minimum_width() {
    let r = route(json!([
        { "location": "Aire", "start": 1798, "end": 1799 },
        { "location": "London", "start": 1799, "end": 1799 },
        { "location": "Britwell", "start": 1799, "end": 1813 },
    ]));
    let spans = place_spans(&r, DEFAULT_X_LIMITS).unwrap();
    assert!(approx(spans[0].start, 1798.0));
    assert!(approx(spans[1].start, 1799.0));
    assert!(approx(spans[1].width, MIN_SPAN_YEARS));
    // Britwell is pushed right by London's widened span.
    assert!(approx(spans[2].start, 1799.0 + MIN_SPAN_YEARS));
    assert!(approx(spans[2].width, 14.0));
    for pair in spans.windows(2) {
        assert!(pair[0].start + pair[0].width <= pair[1].start + 1e-9);
    }
}

#[test]
fn labels_rotate_on_narrow_spans() {
    let r = route(json!([
        { "location": "Dunkirk", "start": 1793, "end": 1793 },
        { "location": "Worcester", "start": 1795, "end": "1807/1808" },
        { "location": "Gosfield", "start": 1796, "end": 1796, "color_key": "Gosfield" },
    ]));
    let spans = place_spans(&r, DEFAULT_X_LIMITS).unwrap();
    assert!(spans[0].rotated);
    assert_eq!(spans[0].label, "Dunkirk");
    assert!(!spans[1].rotated);
    assert_eq!(spans[1].label, "Worcester\n1795–1807/1808");
    assert_eq!(spans[1].color, location_color("Worcester").unwrap());
}

#[test]
fn wide_spans_show_years_and_unknown_places_are_gray() {
    let r = route(json!([{ "location": "Gosfield", "start": 1796, "end": 1813 }]));
    let spans = place_spans(&r, DEFAULT_X_LIMITS).unwrap();
    assert_eq!(spans[0].label, "Gosfield\n1796–1813");

    let r = route(json!([{ "location": "Rome", "start": 1800, "end": 1800 }]));
    let spans = place_spans(&r, (1790.0, 1810.0)).unwrap();
    assert_eq!(spans[0].color, UNKNOWN_COLOR);
    assert!(spans[0].rotated);
}

#[test]
fn color_key_overrides_location() {
    let r = route(json!([{ "location": "Home", "start": 1800, "end": 1820, "color_key": "Scorton" }]));
    let spans = place_spans(&r, DEFAULT_X_LIMITS).unwrap();
    assert_eq!(spans[0].color, location_color("Scorton").unwrap());
    assert_eq!(spans[0].label, "Home\n1800–1820");
}

#[test]
fn render_stacks_one_panel_per_route() {
    let input: RouteChartInput = serde_json::from_value(json!({
        "routes": [
            { "title": "A", "events": [{ "location": "Rouen", "start": 1793, "end": 1795 }] },
            { "title": "B", "events": [{ "location": "Scorton", "start": 1807, "end": 1857 }] },
        ]
    }))
    .unwrap();
    assert_eq!(input.x_limits, DEFAULT_X_LIMITS);
    let scene = render(&input).unwrap();
    assert!(approx(scene.height, 2.0 * 240.0));
    // Two spans, each outlined.
    assert_eq!(scene.count_kind("rect"), 2);
    let ticks = scene
        .shapes
        .iter()
        .filter(|s| matches!(s, Shape::Text { lines, .. } if lines[0] == "1830"))
        .count();
    assert_eq!(ticks, 2);
}

#[test]
fn render_reports_bad_years() {
    let input: RouteChartInput = serde_json::from_value(json!({
        "routes": [{ "title": "A", "events": [{ "location": "Rouen", "start": "when", "end": 1795 }] }]
    }))
    .unwrap();
    assert!(render(&input).is_err());
}

#[test]
fn render_rejects_unusable_limits() {
    for limits in [json!([1800, 1800]), json!([1860, 1790]), json!([0, 1e18])] {
        let input: RouteChartInput = serde_json::from_value(json!({
            "routes": [{ "title": "A", "events": [] }],
            "x_limits": limits,
        }))
        .unwrap();
        assert!(matches!(render(&input), Err(SynopticError::InvalidLimits { .. })), "{limits}");
    }
}
