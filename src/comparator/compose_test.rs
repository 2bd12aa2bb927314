use super::*;
use crate::comparator::cell::parse_cell;
use crate::comparator::table::Row;
use crate::consts::ROW_PADDING;

fn merge_model() -> TableModel {
    let rows = vec![
        Row::new(parse_cell("[M] 3. a"), parse_cell("[M,O] 3. In finem"), parse_cell("[M] c")),
        Row::new(parse_cell("[O] 4. d"), parse_cell("[M,O] 3. In finem"), parse_cell("[O] f")),
    ];
    TableModel::build(&rows)
}

fn texts(scene: &Scene) -> Vec<String> {
    scene
        .shapes
        .iter()
        .filter_map(|s| match s {
            Shape::Text { lines, .. } => Some(lines.join("\n")),
            _ => None,
        })
        .collect()
}

#[test]
fn scene_size_covers_header_and_slots() {
    let model = merge_model();
    let config = DiagramConfig::default();
    let view = View::full(&model);
    let scene = compose(&model, &view, &config, "PSALM 9");
    let params = LayoutParams::from_config(&config, HEADER_HEIGHT);
    let total = layout(&model, &view, &params).total_height;
    assert!((scene.width - canvas_width()).abs() < 1e-9);
    assert!((scene.height - (HEADER_HEIGHT + total + BOTTOM_MARGIN)).abs() < 1e-9);
}

#[test]
fn ribbons_follow_show_links() {
    let model = merge_model();
    let view = View::full(&model);
    let shown = compose(&model, &view, &DiagramConfig::default(), "t");
    assert_eq!(shown.count_kind("polygon"), 4);

    let hidden_config = DiagramConfig { show_links: false, ..DiagramConfig::default() };
    let hidden = compose(&model, &view, &hidden_config, "t");
    assert_eq!(hidden.count_kind("polygon"), 0);
    assert!((shown.height - hidden.height).abs() < 1e-9);
}

#[test]
fn one_card_per_visible_block() {
    let model = merge_model();
    let scene = compose(&model, &View::full(&model), &DiagramConfig::default(), "t");
    // Shadow plus card for each of 2 + 1 + 2 blocks.
    assert_eq!(scene.count_kind("rounded_rect"), 10);
    // One zebra band for the first of two slots, plus one stripe per card.
    assert_eq!(scene.count_kind("rect"), 6);
}

#[test]
fn header_adds_title_and_column_titles() {
    let model = merge_model();
    let view = View::full(&model);
    let with = compose(&model, &view, &DiagramConfig::default(), "PSALM 9");
    let lines = texts(&with);
    assert!(lines.iter().any(|t| t == "PSALM 9"));
    assert!(lines.iter().any(|t| t == "B"));

    let without = compose(&model, &view, &DiagramConfig::default().with_header(false), "PSALM 9");
    assert!(!texts(&without).iter().any(|t| t == "PSALM 9"));
    assert!(without.height < with.height);
}

#[test]
fn id_tag_lists_block_ids_in_display_order() {
    let model = merge_model();
    let scene = compose(&model, &View::full(&model), &DiagramConfig::default(), "t");
    assert!(texts(&scene).iter().any(|t| t == "[M,O]"));

    let no_ids = DiagramConfig { show_ids: false, ..DiagramConfig::default() };
    let scene = compose(&model, &View::full(&model), &no_ids, "t");
    assert!(!texts(&scene).iter().any(|t| t == "[M,O]"));
}

#[test]
fn marker_moves_into_body_without_stripe() {
    let model = merge_model();
    let view = View::full(&model);
    let striped = compose(&model, &view, &DiagramConfig::default(), "t");
    assert!(texts(&striped).iter().any(|t| t == "3"));
    assert!(texts(&striped).iter().any(|t| t == "In finem"));

    let plain = DiagramConfig { show_stripe: false, ..DiagramConfig::default() };
    let scene = compose(&model, &view, &plain, "t");
    assert!(texts(&scene).iter().any(|t| t == "3 In finem"));
    assert_eq!(scene.count_kind("rect"), 1);
}

#[test]
fn inline_marker_lines_are_measured_by_layout() {
    // Exactly 40 characters: one line alone, two once "12 " is prepended.
    let body = "abcdefghi abcdefghi abcdefghi abcdefghij";
    let cell = format!("[M] 12. {body}");
    let model = TableModel::build(&[Row::new(parse_cell(&cell), parse_cell(&cell), parse_cell(&cell))]);
    let view = View::full(&model);
    let config = DiagramConfig { show_stripe: false, wrap_chars: 40, ..DiagramConfig::default() };

    let scene = compose(&model, &view, &config, "t");
    let drawn = scene
        .shapes
        .iter()
        .find_map(|s| match s {
            Shape::Text { lines, line_height, .. } if lines[0].starts_with("12 ") => Some((lines.len(), *line_height)),
            _ => None,
        })
        .unwrap();
    assert_eq!(drawn.0, 2);

    let params = LayoutParams::from_config(&config, HEADER_HEIGHT);
    let slot = layout(&model, &view, &params).slot_heights["M"];
    #[allow(clippy::cast_precision_loss)]
    let needed = drawn.0 as f64 * drawn.1 + ROW_PADDING;
    assert!(slot + 1e-9 >= needed, "slot {slot} < {needed}");
}

#[test]
fn row_labels_and_zebra_are_optional() {
    let model = merge_model();
    let view = View::full(&model);
    let bare = DiagramConfig {
        show_row_ids_left: false,
        show_zebra: false,
        show_stripe: false,
        show_header: false,
        show_ids: false,
        ..DiagramConfig::default()
    };
    let scene = compose(&model, &view, &bare, "t");
    assert_eq!(scene.count_kind("rect"), 0);
    assert!(!texts(&scene).iter().any(|t| t == "M" || t == "O"));
}

#[test]
fn selection_reports_no_matching_rows() {
    let model = merge_model();
    let err = Selection::One("Q".into()).resolve(&model).unwrap_err();
    assert!(matches!(err, SynopticError::NoMatchingRows(ref id) if id == "Q"));
    let view = Selection::One("O".into()).resolve(&model).unwrap();
    assert_eq!(view.visible_ids, vec!["M", "O"]);
    assert_eq!(Selection::All.resolve(&model).unwrap(), View::full(&model));
}

#[test]
fn batch_applies_per_diagram_header() {
    let model = merge_model();
    let requests = vec![
        DiagramRequest { name: "first".into(), view: View::full(&model), show_header: true },
        DiagramRequest { name: "second".into(), view: View::full(&model), show_header: false },
    ];
    let scenes = compose_batch(&model, &requests, &DiagramConfig::default(), "PSALM 9");
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].0, "first");
    assert!(texts(&scenes[0].1).iter().any(|t| t == "PSALM 9"));
    assert!(!texts(&scenes[1].1).iter().any(|t| t == "PSALM 9"));
}
