// Host-side checks for the browser-side constants.
// The web crate only builds for wasm32, so the file is included directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use web_constants::*;

#[test]
fn dom_ids_are_distinct() {
    let ids = [
        BACKGROUND_CANVAS_ID,
        SHIP_CANVAS_ID,
        CONTACT_FORM_ID,
        TOAST_REGION_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn attributes_are_data_attributes() {
    for attr in [VARIANT_ATTR, MODEL_URL_ATTR, SCENE_CONFIG_ATTR, ENDPOINT_ATTR] {
        assert!(attr.starts_with("data-"), "{}", attr);
    }
}

#[test]
fn defaults_are_root_relative() {
    assert!(DEFAULT_MODEL_URL.starts_with('/'));
    assert!(DEFAULT_MODEL_URL.ends_with(".glb"));
    assert!(DEFAULT_CONTACT_ENDPOINT.starts_with('/'));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn render_tuning_is_sane() {
    assert_eq!(MAX_DEVICE_PIXEL_RATIO, 2.0);
    assert_eq!(TOAST_LIFETIME_MS, 5_000);
    assert_eq!(CLEAR_ALPHA, 0.0);
    assert!(PARTICLE_SIZE > 0.0);
    let light: f32 = KEY_LIGHT_DIR.iter().map(|c| c * c).sum();
    assert!(light > 0.0);
    assert!(PARTICLE_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!(STREAK_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
}
