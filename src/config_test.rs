use super::*;

/// # Safety
/// Only one test in this crate mutates `SYNOPTIC_*` variables.
unsafe fn clear_synoptic_env() {
    unsafe {
        std::env::remove_var("SYNOPTIC_FONT_SIZE");
        std::env::remove_var("SYNOPTIC_WRAP_CHARS");
        std::env::remove_var("SYNOPTIC_LINK_OPACITY");
        std::env::remove_var("SYNOPTIC_RIBBON_WIDTH_SCALE");
        std::env::remove_var("SYNOPTIC_EXPORT_RESOLUTION");
        std::env::remove_var("SYNOPTIC_COMPACT");
    }
}

#[test]
fn defaults_are_valid() {
    let cfg = DiagramConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.wrap_chars, DEFAULT_WRAP_CHARS);
    assert!(cfg.show_links);
    assert!(!cfg.compact);
    assert!((cfg.pixel_scale() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = DiagramConfig::from_json_str(r#"{"compact": true, "wrap_chars": 25}"#).unwrap();
    assert!(cfg.compact);
    assert_eq!(cfg.wrap_chars, 25);
    assert_eq!(cfg.column_titles, DiagramConfig::default().column_titles);
    assert!((cfg.font_size - DEFAULT_FONT_SIZE).abs() < f64::EPSILON);
}

#[test]
fn malformed_json_is_parse_error() {
    let err = DiagramConfig::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let cfg = DiagramConfig { link_opacity: 1.5, ..DiagramConfig::default() };
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("link_opacity"));

    let cfg = DiagramConfig { ribbon_width_scale: 0.0, ..DiagramConfig::default() };
    assert!(cfg.validate().is_err());

    let cfg = DiagramConfig { ribbon_width_scale: 1.0, ..DiagramConfig::default() };
    assert!(cfg.validate().is_ok());

    let cfg = DiagramConfig { wrap_chars: 0, ..DiagramConfig::default() };
    assert!(cfg.validate().unwrap_err().to_string().contains("wrap_chars"));

    let cfg = DiagramConfig { font_size: f64::NAN, ..DiagramConfig::default() };
    assert!(cfg.validate().is_err());
}

#[test]
fn with_header_only_changes_header_flag() {
    let cfg = DiagramConfig::default();
    let hidden = cfg.with_header(false);
    assert!(!hidden.show_header);
    assert_eq!(DiagramConfig { show_header: true, ..hidden }, cfg);
}

#[test]
fn header_sentinels_match_case_insensitively() {
    let cfg = DiagramConfig { header_sentinels: vec!["Vulgata".into()], ..DiagramConfig::default() };
    assert!(cfg.is_header_sentinel("  VULGATA "));
    assert!(!cfg.is_header_sentinel("Vulgate"));
}

#[test]
fn load_without_file_applies_env_overrides() {
    unsafe {
        clear_synoptic_env();
        std::env::set_var("SYNOPTIC_WRAP_CHARS", "22");
        std::env::set_var("SYNOPTIC_COMPACT", "yes");
        std::env::set_var("SYNOPTIC_FONT_SIZE", "not-a-number");
    }

    let cfg = DiagramConfig::load(None).unwrap();
    assert_eq!(cfg.wrap_chars, 22);
    assert!(cfg.compact);
    assert!((cfg.font_size - DEFAULT_FONT_SIZE).abs() < f64::EPSILON);

    unsafe {
        std::env::set_var("SYNOPTIC_LINK_OPACITY", "3.0");
    }
    let err = DiagramConfig::load(None).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { field: "link_opacity", .. }));

    unsafe { clear_synoptic_env() };
}

#[test]
fn load_missing_file_reports_path() {
    let err = DiagramConfig::load(Some(Path::new("/nonexistent/synoptic.json"))).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/synoptic.json"));
}
