use super::*;

#[test]
fn bracketed_ids_with_arabic_marker() {
    let cell = parse_cell("[M,O] 3. In finem");
    assert_eq!(cell.ids, vec!["M", "O"]);
    assert_eq!(cell.form, IdForm::Bracketed);
    assert_eq!(cell.marker, "3");
    assert_eq!(cell.body, "In finem");
    assert_eq!(cell.raw, "[M,O] 3. In finem");
}

#[test]
fn single_letter_id_without_marker() {
    let cell = parse_cell("K. intellectum");
    assert_eq!(cell.ids, vec!["K"]);
    assert_eq!(cell.form, IdForm::SingleLetter);
    assert_eq!(cell.marker, "");
    assert_eq!(cell.body, "intellectum");
}

#[test]
fn bracketed_ids_allow_trailing_period_and_spaces() {
    let cell = parse_cell("[A, B2]. 12 Dominus");
    assert_eq!(cell.ids, vec!["A", "B2"]);
    assert_eq!(cell.marker, "12");
    assert_eq!(cell.body, "Dominus");
}

#[test]
fn duplicate_ids_in_one_tag_collapse() {
    let cell = parse_cell("[M,M] text");
    assert_eq!(cell.ids, vec!["M"]);
}

#[test]
fn roman_marker_requires_period() {
    let cell = parse_cell("[P] XII. Salvum me fac");
    assert_eq!(cell.marker, "XII");
    assert_eq!(cell.body, "Salvum me fac");

    let cell = parse_cell("[P] XII Salvum");
    assert_eq!(cell.marker, "");
    assert_eq!(cell.body, "XII Salvum");
}

#[test]
fn arabic_marker_requires_following_whitespace() {
    let cell = parse_cell("[P] 3.Salvum");
    assert_eq!(cell.marker, "");
    assert_eq!(cell.body, "3.Salvum");

    let cell = parse_cell("[P] 7 Salvum");
    assert_eq!(cell.marker, "7");
    assert_eq!(cell.body, "Salvum");
}

#[test]
fn untagged_text_keeps_whole_body() {
    let cell = parse_cell("in toto corde meo");
    assert!(cell.ids.is_empty());
    assert_eq!(cell.form, IdForm::Untagged);
    assert_eq!(cell.body, "in toto corde meo");
}

#[test]
fn untagged_text_still_yields_marker() {
    let cell = parse_cell("4 narrabo omnia");
    assert!(cell.ids.is_empty());
    assert_eq!(cell.marker, "4");
    assert_eq!(cell.body, "narrabo omnia");
}

#[test]
fn malformed_bracket_falls_through() {
    let cell = parse_cell("[M O] text");
    assert!(cell.ids.is_empty());
    assert_eq!(cell.body, "[M O] text");

    let cell = parse_cell("[unclosed text");
    assert!(cell.ids.is_empty());
    assert_eq!(cell.body, "[unclosed text");
}

#[test]
fn lowercase_letter_is_not_an_id() {
    let cell = parse_cell("k. intellectum");
    assert!(cell.ids.is_empty());
    assert_eq!(cell.body, "k. intellectum");
}

#[test]
fn non_ascii_capital_is_not_an_id() {
    let cell = parse_cell("É. intellectum");
    assert!(cell.ids.is_empty());
    assert_eq!(cell.body, "É. intellectum");
}

#[test]
fn empty_and_whitespace_input() {
    for raw in ["", "   ", "\u{a0}\n\t"] {
        let cell = parse_cell(raw);
        assert!(cell.ids.is_empty());
        assert_eq!(cell.marker, "");
        assert_eq!(cell.body, "");
    }
}

#[test]
fn normalizes_nbsp_and_trailing_whitespace() {
    let cell = parse_cell("  [M]\u{a0}2.\u{a0}Beatus vir   \n\n  qui non abiit  ");
    assert_eq!(cell.ids, vec!["M"]);
    assert_eq!(cell.marker, "2");
    assert_eq!(cell.body, "Beatus vir\n  qui non abiit");
}

#[test]
fn parsing_is_idempotent() {
    for raw in ["[M,O] 3. In finem", "K. intellectum", "free text", "", "[X] IV. quare"] {
        assert_eq!(parse_cell(raw), parse_cell(raw));
    }
}
