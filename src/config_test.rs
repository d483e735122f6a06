use super::*;

#[test]
fn defaults_describe_the_profile_page() {
    let config = PageConfig::default();
    assert_eq!(config.counter_selector, ".video-counter");
    assert_eq!(config.counter_attribute, "data-counter");
    assert_eq!(config.tick_ms, 1000);
    assert_eq!(config.resize_throttle_ms, 500);
    assert_eq!(config.modal_step_ms, 20);
    assert_eq!(config.relocations.len(), 6);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn default_table_moves_description_after_position() {
    let rule = default_relocations()
        .into_iter()
        .find(|spec| spec.element_id == "user-description")
        .expect("description rule");
    assert_eq!(rule.target_id, "user-position");
    assert_eq!(rule.media_query, "max-width: 767px");
    assert_eq!(rule.insertion, Insertion::After);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = PageConfig::from_json(r#"{ "resize_throttle_ms": 250 }"#).expect("valid config");
    assert_eq!(config.resize_throttle_ms, 250);
    assert_eq!(config.tick_ms, 1000);
    assert_eq!(config.relocations, default_relocations());
    assert_eq!(config.camera, CameraConfig::default());
}

#[test]
fn relocation_insertion_defaults_to_prepend() {
    let config = PageConfig::from_json(
        r#"{ "relocations": [
            { "element_id": "a", "target_id": "b", "media_query": "max-width: 600px" },
            { "element_id": "c", "target_id": "d", "media_query": "(min-width: 1200px)", "insertion": "after" }
        ] }"#,
    )
    .expect("valid config");
    assert_eq!(config.relocations[0].insertion, Insertion::Prepend);
    assert_eq!(config.relocations[1].insertion, Insertion::After);
}

#[test]
fn camera_section_overrides_single_field() {
    let config = PageConfig::from_json(r#"{ "camera": { "enabled": false } }"#).expect("valid config");
    assert!(!config.camera.enabled);
    assert_eq!(config.camera.preview_id, "live-stream");
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(PageConfig::from_json("{ not json"), Err(PageError::Config(_))));
    assert!(matches!(
        PageConfig::from_json(r#"{ "tick_ms": "fast" }"#),
        Err(PageError::Config(_))
    ));
}

#[test]
fn validate_rejects_zero_periods() {
    let config = PageConfig { tick_ms: 0, ..PageConfig::default() };
    assert!(matches!(config.validate(), Err(PageError::Config(msg)) if msg.contains("tick_ms")));

    let config = PageConfig { modal_step_ms: 0, ..PageConfig::default() };
    assert!(matches!(config.validate(), Err(PageError::Config(msg)) if msg.contains("modal_step_ms")));

    let config = PageConfig { resize_throttle_ms: 0, ..PageConfig::default() };
    assert!(matches!(config.validate(), Err(PageError::Config(msg)) if msg.contains("resize_throttle_ms")));
}

#[test]
fn zero_resize_window_in_island_falls_back_to_default() {
    let config = PageConfig::load(Some(r#"{ "resize_throttle_ms": 0 }"#));
    assert_eq!(config.resize_throttle_ms, 500);
}

#[test]
fn validate_rejects_bad_relocations() {
    let bad_query = PageConfig {
        relocations: vec![RelocationSpec::new("a", "b", "wide screens", Insertion::Prepend)],
        ..PageConfig::default()
    };
    assert!(bad_query.validate().is_err());

    let self_target = PageConfig {
        relocations: vec![RelocationSpec::new("a", "a", "max-width: 600px", Insertion::Prepend)],
        ..PageConfig::default()
    };
    assert!(matches!(self_target.validate(), Err(PageError::Config(msg)) if msg.contains("itself")));

    let missing_id = PageConfig {
        relocations: vec![RelocationSpec::new("", "b", "max-width: 600px", Insertion::Prepend)],
        ..PageConfig::default()
    };
    assert!(missing_id.validate().is_err());
}

#[test]
fn load_falls_back_to_defaults() {
    assert_eq!(PageConfig::load(None), PageConfig::default());
    assert_eq!(PageConfig::load(Some("   ")), PageConfig::default());
    assert_eq!(PageConfig::load(Some("{ broken")), PageConfig::default());
    assert_eq!(PageConfig::load(Some(r#"{ "tick_ms": 0 }"#)), PageConfig::default());
}

#[test]
fn load_uses_valid_island() {
    let config = PageConfig::load(Some(r#"{ "tick_ms": 500 }"#));
    assert_eq!(config.tick_ms, 500);
}
