// Host-side tests for the scene animation driver.

use folio_core::*;
use glam::Vec3;
use std::f32::consts::TAU;

const VIEW: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

fn input() -> InputSnapshot {
    InputSnapshot {
        viewport: VIEW,
        ..Default::default()
    }
}

fn with_scroll(progress_px: f32) -> InputSnapshot {
    InputSnapshot {
        scroll: ScrollProgress::from_offset(progress_px, ScrollRange::default()),
        ..input()
    }
}

fn idle_only() -> SceneConfig {
    let mut config = SceneConfig::hero();
    config.entry = None;
    config.exit.trigger = ExitTrigger::Never;
    config
}

fn unit_bounds() -> Aabb {
    Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

fn ready(config: SceneConfig) -> SceneDriver {
    let mut driver = SceneDriver::new(config, VIEW);
    assert!(driver.on_asset_ready(&unit_bounds()));
    driver
}

fn run(driver: &mut SceneDriver, seconds: f32, dt: f32, snapshot: &InputSnapshot) -> FrameOutput {
    let steps = (seconds / dt).ceil() as usize;
    let mut out = driver.update(0.0, snapshot);
    for _ in 0..steps {
        out = driver.update(dt, snapshot);
    }
    out
}

#[test]
fn no_object_until_the_asset_arrives() {
    let mut driver = SceneDriver::new(SceneConfig::hero(), VIEW);
    let out = run(&mut driver, 1.0, 1.0 / 60.0, &input());
    assert_eq!(out.phase, Phase::Loading);
    assert!(out.object.is_none());
    assert!(out.glow.is_none());
    assert!(driver.object().is_none());
    // The scene itself keeps animating while loading.
    assert!(out.particle_rotation > 0.0);
}

#[test]
fn failed_asset_leaves_the_scene_empty() {
    let mut driver = SceneDriver::new(SceneConfig::hero(), VIEW);
    driver.on_asset_failed(&AssetError::Http(404));
    let out = run(&mut driver, 0.5, 0.05, &input());
    assert_eq!(out.phase, Phase::Loading);
    assert!(out.object.is_none());
}

#[test]
fn duplicate_asset_ready_is_ignored() {
    let mut driver = ready(SceneConfig::hero());
    assert_eq!(driver.phase(), Phase::Entry);
    run(&mut driver, 0.3, 0.05, &input());
    let before = *driver.object().unwrap();
    let eye = driver.camera().eye;
    assert!(!driver.on_asset_ready(&Aabb::new(Vec3::splat(-40.0), Vec3::splat(40.0))));
    assert_eq!(driver.phase(), Phase::Entry);
    assert_eq!(*driver.object().unwrap(), before);
    assert_eq!(driver.camera().eye, eye);
}

#[test]
fn entry_eases_in_and_hands_over_to_idle() {
    let mut driver = ready(SceneConfig::hero());
    let first = driver.update(0.0, &input());
    assert_eq!(first.phase, Phase::Entry);
    assert!(driver.object().unwrap().opacity < 0.05);

    let out = run(&mut driver, 2.45, 0.05, &input());
    assert_eq!(out.phase, Phase::Idle);
    let object = driver.object().unwrap();
    assert_eq!(object.opacity, 1.0);
    assert!(object.visible);
    assert!((object.position.x - driver.anchor_x()).abs() < 0.2);
}

#[test]
fn idle_bob_is_periodic() {
    let config = idle_only();
    let period = TAU / config.motion.bob_frequency;
    let mut driver = ready(config);
    driver.update(0.0, &input());
    let y0 = driver.object().unwrap().position.y;

    let steps = 400;
    let dt = period / steps as f32;
    for _ in 0..steps {
        driver.update(dt, &input());
    }
    assert!((driver.clock().elapsed() - period).abs() < 1e-3);
    let y1 = driver.object().unwrap().position.y;
    assert!((y0 - y1).abs() < 1e-3, "{} vs {}", y0, y1);
}

#[test]
fn idle_offset_only_bobs_in_y() {
    let motion = MotionTuning::default();
    let quarter = TAU / motion.bob_frequency / 4.0;
    let o = idle_offset(&motion, quarter);
    assert!((o.y - motion.bob_amplitude).abs() < 1e-5);
    assert_eq!(o.z, 0.0);
}

#[test]
fn pointer_tilts_the_ship_smoothly() {
    let mut driver = ready(idle_only());
    let snapshot = InputSnapshot {
        pointer: PointerState { x: 1.0, y: 0.0 },
        ..input()
    };
    driver.update(1.0 / 60.0, &snapshot);
    let early = driver.object().unwrap().rotation.y;
    run(&mut driver, 3.0, 1.0 / 60.0, &snapshot);
    let settled = driver.object().unwrap().rotation;
    let tilt = driver.config().motion.tilt_y;
    assert!(early > 0.0 && early < tilt * 0.2);
    assert!((settled.y - tilt).abs() < 1e-3);
    assert!(settled.x.abs() < 1e-3);
}

#[test]
fn resize_keeps_time_and_moves_the_anchor() {
    let mut driver = ready(idle_only());
    run(&mut driver, 1.0, 0.05, &input());
    let elapsed = driver.clock().elapsed();
    let anchor = driver.anchor_x();

    let wide = Viewport::new(2560.0, 720.0);
    let snapshot = InputSnapshot {
        viewport: wide,
        ..input()
    };
    driver.update(0.0, &snapshot);
    assert_eq!(driver.clock().elapsed(), elapsed);
    assert!(driver.anchor_x() > anchor);
    assert_eq!(driver.phase(), Phase::Idle);
    assert!((driver.camera().aspect - wide.aspect()).abs() < 1e-6);
}

#[test]
fn glow_tracks_the_ship_at_its_local_offset() {
    let mut driver = ready(idle_only());
    let out = run(&mut driver, 0.7, 0.05, &input());
    let object = out.object.expect("ship visible");
    let glow = out.glow.expect("glow visible");
    let expected = object.transform.transform_point3(driver.config().glow.offset);
    assert!((glow.position - expected).length() < 1e-4);
    assert!(glow.opacity > 0.0 && glow.opacity <= 1.0);
}

#[test]
fn elapsed_exit_hides_the_ship_for_good() {
    let mut config = idle_only();
    config.exit.trigger = ExitTrigger::Elapsed { after: 0.5 };
    config.exit.duration = 1.0;
    config.exit.looping = false;
    let mut driver = ready(config);
    let snapshot = InputSnapshot {
        pointer: PointerState { x: 0.8, y: -0.5 },
        ..input()
    };

    let mut saw_exit = false;
    for _ in 0..80 {
        let out = driver.update(0.05, &snapshot);
        saw_exit |= out.phase == Phase::Exit;
    }
    assert!(saw_exit);
    assert_eq!(driver.phase(), Phase::Hidden);
    let object = driver.object().unwrap();
    assert!(!object.visible);
    assert_eq!(object.opacity, 0.0);

    let out = driver.update(0.05, &snapshot);
    assert!(out.object.is_none());
    assert!(out.streaks.is_empty());
    assert_eq!(out.exposure, driver.config().exposure);
}

#[test]
fn looping_exit_restarts_the_pass() {
    let mut config = SceneConfig::hyperjump();
    config.entry = None;
    config.exit.trigger = ExitTrigger::Elapsed { after: 0.2 };
    config.exit.duration = 0.5;
    let mut driver = ready(config);

    let mut saw_exit = false;
    let mut restarted = None;
    for _ in 0..40 {
        let out = driver.update(0.05, &input());
        if out.phase == Phase::Exit {
            saw_exit = true;
        } else if saw_exit {
            restarted = Some(out);
            break;
        }
    }
    let out = restarted.expect("exit finished");
    assert_eq!(out.phase, Phase::Idle);
    assert!(driver.clock().elapsed() < 0.1);
    assert_eq!(out.canvas_opacity, 1.0);
    assert!(out.object.is_some());
}

#[test]
fn canvas_fade_variant_leaves_materials_opaque() {
    let mut config = SceneConfig::hyperjump();
    config.entry = None;
    config.exit.trigger = ExitTrigger::Elapsed { after: 0.0 };
    config.exit.duration = 1.0;
    let mut driver = ready(config);
    driver.update(0.05, &input());
    let out = run(&mut driver, 0.8, 0.05, &input());
    assert_eq!(out.phase, Phase::Exit);
    assert!(out.canvas_opacity < 1.0);
    assert_eq!(out.object.unwrap().material_opacity, 1.0);
}

#[test]
fn scroll_drives_the_jump_and_can_be_undone() {
    let mut config = SceneConfig::hero();
    config.entry = None;
    let base_exposure = config.exposure;
    let mut driver = ready(config);
    driver.update(0.05, &input());
    assert_eq!(driver.phase(), Phase::Idle);

    // Halfway through the scroll range.
    let half = with_scroll(420.0);
    driver.update(0.05, &half);
    assert_eq!(driver.phase(), Phase::Exit);
    let out = driver.update(0.05, &half);
    assert!((driver.exit_progress() - 0.5).abs() < 1e-6);
    assert!((out.exposure - (base_exposure + driver.config().exit.flash)).abs() < 1e-4);
    assert!(!out.streaks.is_empty());
    assert!((out.streak_opacity - 1.0).abs() < 1e-6);
    assert!(driver.object().unwrap().scale < 1.0);
    assert!(driver.object().unwrap().position.z < 0.0);

    // Back to the top before finishing.
    let out = driver.update(0.05, &with_scroll(0.0));
    assert_eq!(out.phase, Phase::Idle);
    assert_eq!(out.exposure, base_exposure);
    assert_eq!(driver.object().unwrap().scale, 1.0);
    assert!(out.streaks.is_empty());

    // All the way down.
    let end = with_scroll(10_000.0);
    driver.update(0.05, &end);
    let out = driver.update(0.05, &end);
    assert_eq!(out.phase, Phase::Hidden);
    assert!(out.object.is_none());
    assert_eq!(driver.object().unwrap().opacity, 0.0);
}

#[test]
fn manual_exit_only_starts_from_idle() {
    let mut driver = ready(SceneConfig::hero());
    driver.trigger_exit();
    assert_eq!(driver.phase(), Phase::Entry);

    let mut driver = ready(idle_only());
    driver.update(0.05, &input());
    driver.trigger_exit();
    assert_eq!(driver.phase(), Phase::Exit);
    run(&mut driver, 2.0, 0.05, &input());
    assert_eq!(driver.phase(), Phase::Hidden);
}

#[test]
fn cruise_path_crosses_the_screen_and_fades() {
    let mut driver = ready(SceneConfig::cruise());
    assert_eq!(driver.phase(), Phase::Idle);
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut hidden_frames = 0;
    for _ in 0..160 {
        let out = driver.update(0.05, &input());
        let object = driver.object().unwrap();
        min_x = min_x.min(object.position.x);
        max_x = max_x.max(object.position.x);
        if out.object.is_none() {
            hidden_frames += 1;
        }
        assert!(object.scale >= 0.7 - 1e-6 && object.scale <= 1.0 + 1e-6);
    }
    assert!(max_x > 0.0);
    assert!(min_x < -10.0);
    assert!(hidden_frames > 0);
    assert_eq!(driver.phase(), Phase::Idle);
}

#[test]
fn bank_never_exceeds_its_limit_even_when_steep() {
    let mut config = SceneConfig::cruise();
    config.motion.bank_per_velocity = 10.0;
    let limit = config.motion.bank_limit;
    let mut driver = ready(config);
    let mut max_bank = 0.0f32;
    // Two full passes, wrap included.
    for _ in 0..900 {
        driver.update(1.0 / 60.0, &input());
        max_bank = max_bank.max(driver.object().unwrap().rotation.z.abs());
    }
    assert!(max_bank <= limit + 1e-5, "bank {max_bank} over {limit}");
    assert!(max_bank > 0.5 * limit);
}

#[test]
fn anchored_ship_without_sway_does_not_bank() {
    let mut config = idle_only();
    config.motion.sway_amplitude = 0.0;
    let mut driver = ready(config);
    run(&mut driver, 5.0, 1.0 / 60.0, &input());
    assert!(driver.object().unwrap().rotation.z.abs() < 1e-6);
}

#[test]
fn cruise_yaw_drifts_slowly() {
    let mut driver = ready(SceneConfig::cruise());
    run(&mut driver, 8.0, 0.05, &input());
    let expected = driver.clock().elapsed() * CruisePath::default().orbit_rate;
    let yaw = driver.object().unwrap().rotation.y;
    assert!(expected > 0.7);
    assert!((yaw - expected).abs() < 0.05, "yaw {yaw} vs {expected}");
}

#[test]
fn entry_starts_where_the_object_was_placed() {
    let mut driver = ready(SceneConfig::hero());
    let placed = driver.object().unwrap().position;
    driver.update(0.0, &input());
    assert_eq!(driver.phase(), Phase::Entry);
    assert!(driver.object().unwrap().position.distance(placed) < 1e-5);
}
