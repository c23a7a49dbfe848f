// Host-side tests for scene presets, overrides and input normalization.

use folio_core::*;

#[test]
fn presets_differ_where_they_should() {
    let hero = SceneConfig::hero();
    assert_eq!(hero.idle, IdlePath::Anchored);
    assert_eq!(hero.exit.trigger, ExitTrigger::Scroll);
    assert!(hero.entry.is_some());
    assert!(hero.fade_materials);

    let cruise = SceneConfig::cruise();
    assert!(matches!(cruise.idle, IdlePath::Cruise(_)));
    assert!(cruise.camera_tracking);
    assert_eq!(cruise.exit.trigger, ExitTrigger::Never);

    let jump = SceneConfig::hyperjump();
    assert!(jump.exit.looping);
    assert!(!jump.fade_materials);
    assert!(matches!(jump.exit.trigger, ExitTrigger::Elapsed { .. }));
}

#[test]
fn preset_names_are_forgiving() {
    assert_eq!(SceneConfig::preset(" Cruise "), Some(SceneConfig::cruise()));
    assert_eq!(SceneConfig::preset(""), Some(SceneConfig::hero()));
    assert_eq!(SceneConfig::preset("warp"), None);
}

#[test]
fn resolve_without_overrides_is_the_preset() {
    assert_eq!(SceneConfig::resolve(None, None), Ok(SceneConfig::hero()));
    assert_eq!(
        SceneConfig::resolve(Some("hyperjump"), Some("   ")),
        Ok(SceneConfig::hyperjump())
    );
}

#[test]
fn overrides_merge_over_the_chosen_preset() {
    let config = SceneConfig::resolve(
        Some("hyperjump"),
        Some(r#"{"exit": {"duration": 3.0}, "anchor_ratio": 0.6, "glow": {"color": [1, 0, 0]}}"#),
    )
    .unwrap();
    let base = SceneConfig::hyperjump();
    assert_eq!(config.exit.duration, 3.0);
    assert_eq!(config.exit.trigger, base.exit.trigger);
    assert!(config.exit.looping);
    assert_eq!(config.anchor_ratio, 0.6);
    assert!(!config.fade_materials);
    assert_eq!(config.glow.color, [1.0, 0.0, 0.0]);
    assert_eq!(config.glow.size, base.glow.size);
}

#[test]
fn overrides_can_switch_tagged_variants() {
    let config = SceneConfig::resolve(
        None,
        Some(r#"{"exit": {"trigger": {"kind": "elapsed", "after": 4.5}}, "entry": null}"#),
    )
    .unwrap();
    assert_eq!(config.exit.trigger, ExitTrigger::Elapsed { after: 4.5 });
    assert!(config.entry.is_none());
}

#[test]
fn bad_input_is_reported() {
    assert_eq!(
        SceneConfig::resolve(Some("warp"), None),
        Err(ConfigError::UnknownVariant("warp".into()))
    );
    assert!(matches!(
        SceneConfig::resolve(None, Some("{not json")),
        Err(ConfigError::Overrides(_))
    ));
    assert!(matches!(
        SceneConfig::resolve(None, Some(r#"{"exposure": "bright"}"#)),
        Err(ConfigError::Overrides(_))
    ));
}

#[test]
fn scroll_progress_is_clamped() {
    let range = ScrollRange {
        start: 100.0,
        span: 400.0,
    };
    assert_eq!(ScrollProgress::from_offset(0.0, range).value(), 0.0);
    assert_eq!(ScrollProgress::from_offset(300.0, range).value(), 0.5);
    assert_eq!(ScrollProgress::from_offset(9_000.0, range).value(), 1.0);
    assert_eq!(ScrollProgress::from_offset(f32::NAN, range).value(), 0.0);

    let step = ScrollRange { start: 50.0, span: 0.0 };
    assert_eq!(ScrollProgress::from_offset(49.0, step).value(), 0.0);
    assert_eq!(ScrollProgress::from_offset(50.0, step).value(), 1.0);
}

#[test]
fn pointer_is_normalized_with_y_up() {
    let rect = ClientRect {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };
    assert_eq!(PointerState::from_client(400.0, 300.0, rect), PointerState { x: 0.0, y: 0.0 });
    assert_eq!(PointerState::from_client(800.0, 0.0, rect), PointerState { x: 1.0, y: 1.0 });
    assert_eq!(PointerState::from_client(-50.0, 900.0, rect), PointerState { x: -1.0, y: -1.0 });

    let empty = ClientRect { width: 0.0, ..rect };
    assert_eq!(PointerState::from_client(10.0, 10.0, empty), PointerState::default());
}

#[test]
fn degenerate_viewport_has_unit_aspect() {
    assert_eq!(Viewport::new(0.0, 100.0).aspect(), 1.0);
    assert_eq!(Viewport::new(1920.0, 1080.0).aspect(), 1920.0 / 1080.0);
}
