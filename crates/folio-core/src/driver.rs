//! Scene animation driver.
//!
//! One [`SceneDriver`] owns the camera, the ship state and the derived effect
//! state for a mounted scene. The frame loop calls [`SceneDriver::update`]
//! exactly once per display refresh with a snapshot of the input cells; no
//! listener mutates driver state directly.

use crate::anchor::AnchorProjector;
use crate::camera::{Aabb, Camera};
use crate::clock::AnimationClock;
use crate::config::{CruisePath, ExitTrigger, IdlePath, MotionTuning, SceneConfig};
use crate::constants::{AMBIENT_PARTICLE_SPIN, VISIBILITY_EPSILON};
use crate::easing::{
    damp, damp_vec3, ease_in_cubic, ease_out_cubic, lerp, smoothstep,
};
use crate::effects::{EffectState, GlowEmitter};
use crate::error::AssetError;
use crate::input::{InputSnapshot, Viewport};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the ship asset; the scene renders without it.
    Loading,
    Entry,
    Idle,
    Exit,
    /// Terminal state of a non-looping exit.
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedObjectState {
    pub position: Vec3,
    /// Euler angles (x, y, z) applied in XYZ order.
    pub rotation: Vec3,
    pub scale: f32,
    pub visible: bool,
    pub opacity: f32,
}

impl AnimatedObjectState {
    fn at(position: Vec3, opacity: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
            visible: opacity > VISIBILITY_EPSILON,
            opacity,
        }
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }
}

/// What the renderer needs for the ship this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectFrame {
    pub transform: Mat4,
    /// Opacity applied to every surface material.
    pub material_opacity: f32,
}

#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub phase: Phase,
    pub view: Mat4,
    pub view_proj: Mat4,
    pub camera_eye: Vec3,
    /// `None` while loading, hidden, or faded out.
    pub object: Option<ObjectFrame>,
    pub glow: Option<GlowEmitter>,
    pub streaks: Vec<[Vec3; 2]>,
    pub streak_opacity: f32,
    /// Opacity of the whole scene canvas.
    pub canvas_opacity: f32,
    pub exposure: f32,
    pub particle_rotation: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitDrive {
    Timed,
    Scroll,
}

/// Shape of the ship on its steady-state path at a given moment.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PathPose {
    position: Vec3,
    opacity: f32,
    scale: f32,
    /// Scales pointer parallax and banking; drops to zero as the ship leaves.
    presence: f32,
    /// Base yaw the pointer parallax is added to.
    yaw: f32,
}

pub struct SceneDriver {
    config: SceneConfig,
    clock: AnimationClock,
    phase: Phase,
    phase_time: f32,
    camera: Camera,
    look_at: Vec3,
    anchor: AnchorProjector,
    viewport: Viewport,
    object: Option<AnimatedObjectState>,
    effects: EffectState,
    exit_drive: ExitDrive,
    exit_progress: f32,
    prev_x: Option<f32>,
    exposure: f32,
    canvas_opacity: f32,
    particle_rotation: f32,
}

impl SceneDriver {
    pub fn new(config: SceneConfig, viewport: Viewport) -> Self {
        let camera = Camera::rest(viewport.aspect());
        let mut anchor = AnchorProjector::new(config.anchor_ratio, config.anchor_depth);
        anchor.recompute(&camera);
        let effects = EffectState::new(config.exit.streak_count, config.seed);
        log::info!(
            "[scene] driver ready idle={:?} exit={:?} anchor_x={:.3}",
            config.idle,
            config.exit.trigger,
            anchor.value()
        );
        Self {
            exposure: config.exposure,
            config,
            clock: AnimationClock::new(),
            phase: Phase::Loading,
            phase_time: 0.0,
            camera,
            look_at: Vec3::ZERO,
            anchor,
            viewport,
            object: None,
            effects,
            exit_drive: ExitDrive::Timed,
            exit_progress: 0.0,
            prev_x: None,
            canvas_opacity: 1.0,
            particle_rotation: 0.0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn anchor_x(&self) -> f32 {
        self.anchor.value()
    }

    pub fn object(&self) -> Option<&AnimatedObjectState> {
        self.object.as_ref()
    }

    pub fn effects(&self) -> &EffectState {
        &self.effects
    }

    pub fn exit_progress(&self) -> f32 {
        self.exit_progress
    }

    /// The asset finished loading: frame the camera on it and bring the ship in.
    ///
    /// Returns `false` (and changes nothing) unless the driver is still
    /// loading, so a second resolution can never add a second ship.
    pub fn on_asset_ready(&mut self, bounds: &Aabb) -> bool {
        if self.phase != Phase::Loading || self.object.is_some() {
            log::warn!("[scene] asset resolved in phase {:?}; ignoring", self.phase);
            return false;
        }
        self.camera.fit_to_bounds(bounds);
        self.anchor.recompute(&self.camera);
        log::info!(
            "[scene] asset ready extent={:.2} camera_z={:.2} anchor_x={:.3}",
            bounds.max_extent(),
            self.camera.eye.z,
            self.anchor.value()
        );
        self.start_pass();
        true
    }

    /// The asset will never arrive; the scene keeps running without a ship.
    pub fn on_asset_failed(&mut self, err: &AssetError) {
        log::error!("[scene] ship unavailable: {}", err);
    }

    /// Re-aim the camera for a new viewport and refresh the anchor.
    ///
    /// Animation time and ship state are left untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        self.anchor.recompute(&self.camera);
    }

    /// Start a timed exit from the idle phase.
    pub fn trigger_exit(&mut self) {
        if self.phase == Phase::Idle {
            self.enter_exit(ExitDrive::Timed);
        }
    }

    pub fn update(&mut self, dt: f32, input: &InputSnapshot) -> FrameOutput {
        if input.viewport != self.viewport {
            self.resize(input.viewport);
        }
        let dt = self.clock.advance(dt);
        self.phase_time += dt;
        self.particle_rotation += AMBIENT_PARTICLE_SPIN * dt;

        match self.phase {
            Phase::Loading | Phase::Hidden => {}
            Phase::Entry => self.step_entry(dt, input),
            Phase::Idle => self.step_idle(dt, input),
            Phase::Exit => self.step_exit(dt, input),
        }
        self.output()
    }

    fn start_pass(&mut self) {
        let t = self.clock.elapsed();
        let pose = self.path_pose(t);
        self.exit_progress = 0.0;
        self.exposure = self.config.exposure;
        self.canvas_opacity = 1.0;
        self.effects.hide();
        self.prev_x = None;
        self.phase_time = 0.0;
        match &self.config.entry {
            Some(entry) if entry.duration > 0.0 => {
                self.object = Some(AnimatedObjectState::at(self.entry_origin(entry.from_offset), 0.0));
                self.phase = Phase::Entry;
            }
            _ => {
                let mut object = AnimatedObjectState::at(pose.position, pose.opacity);
                object.scale = pose.scale;
                self.object = Some(object);
                self.phase = Phase::Idle;
            }
        }
        log::debug!("[scene] pass started in {:?}", self.phase);
    }

    fn step_entry(&mut self, dt: f32, input: &InputSnapshot) {
        let Some(entry) = self.config.entry.clone() else {
            self.enter_phase(Phase::Idle);
            return;
        };
        let progress = (self.phase_time / entry.duration).clamp(0.0, 1.0);
        let pose = self.path_pose(self.clock.elapsed());
        let from = self.entry_origin(entry.from_offset);
        let eased = ease_out_cubic(progress);
        let position = from.lerp(pose.position, eased);
        let opacity = smoothstep(0.0, 0.6, progress) * pose.opacity;
        self.apply_pose(
            dt,
            input,
            PathPose {
                position,
                opacity,
                scale: pose.scale,
                presence: pose.presence * eased,
                yaw: pose.yaw,
            },
        );
        if progress >= 1.0 {
            self.enter_phase(Phase::Idle);
        }
    }

    fn step_idle(&mut self, dt: f32, input: &InputSnapshot) {
        let pose = self.path_pose(self.clock.elapsed());
        self.apply_pose(dt, input, pose);
        self.effects.streaks.length = 0.0;
        self.effects.streaks.opacity = 0.0;

        match self.config.exit.trigger {
            ExitTrigger::Never => {}
            ExitTrigger::Elapsed { after } => {
                if self.phase_time >= after {
                    self.enter_exit(ExitDrive::Timed);
                }
            }
            ExitTrigger::Scroll => {
                if input.scroll.value() > 0.0 {
                    self.enter_exit(ExitDrive::Scroll);
                }
            }
        }
    }

    fn step_exit(&mut self, dt: f32, input: &InputSnapshot) {
        let progress = match self.exit_drive {
            ExitDrive::Timed => {
                let duration = self.config.exit.duration;
                if duration > 0.0 {
                    (self.phase_time / duration).clamp(0.0, 1.0)
                } else {
                    1.0
                }
            }
            ExitDrive::Scroll => input.scroll.value(),
        };
        if self.exit_drive == ExitDrive::Scroll && progress <= 0.0 {
            log::debug!("[scene] scrolled back before the jump completed");
            self.exposure = self.config.exposure;
            self.canvas_opacity = 1.0;
            self.exit_progress = 0.0;
            self.enter_phase(Phase::Idle);
            self.step_idle(dt, input);
            return;
        }
        self.exit_progress = progress;
        if progress >= 1.0 {
            self.complete_exit();
            return;
        }

        let exit = self.config.exit.clone();
        let mut pose = self.path_pose(self.clock.elapsed());
        pose.position.z -= exit.dive_depth * ease_in_cubic(progress);
        pose.scale *= lerp(1.0, exit.min_scale, smoothstep(0.0, 1.0, progress));
        pose.presence *= 1.0 - progress;
        let fade = 1.0 - smoothstep(0.55, 1.0, progress);
        if self.config.fade_materials {
            pose.opacity *= fade;
        } else {
            self.canvas_opacity = fade;
        }
        self.apply_pose(dt, input, pose);

        self.exposure = self.config.exposure + exit.flash * (PI * progress).sin();
        self.effects.streaks.length = ease_out_cubic(progress) * exit.streak_length;
        self.effects.streaks.opacity =
            smoothstep(0.0, 0.2, progress) * (1.0 - smoothstep(0.85, 1.0, progress));
    }

    fn complete_exit(&mut self) {
        if let Some(object) = self.object.as_mut() {
            object.visible = false;
            object.opacity = 0.0;
        }
        self.effects.hide();
        self.exposure = self.config.exposure;
        if !self.config.fade_materials {
            self.canvas_opacity = 0.0;
        }
        if self.config.exit.looping {
            log::info!("[scene] jump complete; looping");
            self.clock.restart();
            self.start_pass();
        } else {
            log::info!("[scene] jump complete; ship hidden");
            self.enter_phase(Phase::Hidden);
        }
    }

    fn enter_exit(&mut self, drive: ExitDrive) {
        log::info!("[scene] exit started ({:?})", drive);
        self.exit_drive = drive;
        self.exit_progress = 0.0;
        self.enter_phase(Phase::Exit);
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.phase_time = 0.0;
    }

    fn apply_pose(&mut self, dt: f32, input: &InputSnapshot, pose: PathPose) {
        let motion = &self.config.motion;
        let velocity_x = match self.prev_x {
            Some(prev) if dt > 0.0 => (pose.position.x - prev) / dt,
            _ => 0.0,
        };
        self.prev_x = Some(pose.position.x);
        let bank = (-velocity_x * motion.bank_per_velocity * pose.presence)
            .clamp(-motion.bank_limit, motion.bank_limit);
        let target = Vec3::new(
            input.pointer.y * motion.tilt_x * pose.presence,
            pose.yaw + input.pointer.x * motion.tilt_y * pose.presence,
            bank,
        );
        let rates = Vec3::from_array(motion.rotation_rates);

        let Some(object) = self.object.as_mut() else {
            return;
        };
        object.position = pose.position;
        object.rotation = damp_vec3(object.rotation, target, rates, dt);
        object.scale = pose.scale;
        object.opacity = pose.opacity.clamp(0.0, 1.0);
        object.visible = object.opacity > VISIBILITY_EPSILON;

        if self.config.camera_tracking {
            let rate = self.config.camera_tracking_rate;
            self.look_at = Vec3::new(
                damp(self.look_at.x, object.position.x, rate, dt),
                damp(self.look_at.y, object.position.y, rate, dt),
                damp(self.look_at.z, object.position.z, rate, dt),
            );
        }

        let transform = object.transform();
        let opacity = object.opacity;
        self.effects
            .glow
            .update(&self.config.glow, transform, opacity, self.clock.elapsed());
    }

    /// Where an entry starts: the resting spot shifted by the entry offset.
    fn entry_origin(&self, from_offset: Vec3) -> Vec3 {
        self.rest_position() + from_offset
    }

    fn rest_position(&self) -> Vec3 {
        match &self.config.idle {
            IdlePath::Anchored => Vec3::new(
                self.anchor.value(),
                self.config.rest_y,
                self.anchor.depth(),
            ),
            IdlePath::Cruise(path) => {
                Vec3::new(path.start[0] + path.offset[0], path.start[1] + path.offset[1], 0.0)
            }
        }
    }

    fn path_pose(&self, t: f32) -> PathPose {
        let motion = &self.config.motion;
        match &self.config.idle {
            IdlePath::Anchored => PathPose {
                position: self.rest_position() + idle_offset(motion, t),
                opacity: 1.0,
                scale: 1.0,
                presence: 1.0,
                yaw: 0.0,
            },
            IdlePath::Cruise(path) => {
                let mut pose = cruise_pose(path, t);
                pose.position.y += bob(motion, t);
                pose
            }
        }
    }

    fn output(&self) -> FrameOutput {
        let mut camera = self.camera.clone();
        if self.config.camera_tracking {
            camera.target = self.look_at;
        }
        let visible = self.object.as_ref().filter(|o| o.visible);
        let object = visible.map(|o| ObjectFrame {
            transform: o.transform(),
            material_opacity: o.opacity,
        });
        let origin = visible.map(|o| o.position).unwrap_or(Vec3::ZERO);
        FrameOutput {
            phase: self.phase,
            view: camera.view_matrix(),
            view_proj: camera.view_projection(),
            camera_eye: camera.eye,
            object,
            glow: visible.map(|_| self.effects.glow),
            streaks: if visible.is_some() {
                self.effects.streaks.segments(origin)
            } else {
                Vec::new()
            },
            streak_opacity: self.effects.streaks.opacity,
            canvas_opacity: self.canvas_opacity,
            exposure: self.exposure,
            particle_rotation: self.particle_rotation,
        }
    }
}

#[inline]
fn bob(motion: &MotionTuning, t: f32) -> f32 {
    (t * motion.bob_frequency).sin() * motion.bob_amplitude
}

/// Idle bob (y) and sway (x) around the anchor at time `t`.
pub fn idle_offset(motion: &MotionTuning, t: f32) -> Vec3 {
    Vec3::new(
        (t * motion.sway_frequency).sin() * motion.sway_amplitude,
        bob(motion, t),
        0.0,
    )
}

/// Keyframed fly-through: start → centre → far end, then wrap.
fn cruise_pose(path: &CruisePath, t: f32) -> PathPose {
    let s = (t * path.speed).rem_euclid(1.0);
    let center_at = path.center_at.clamp(f32::EPSILON, 1.0 - f32::EPSILON);
    let fade_out_at = path.fade_out_at.clamp(0.0, 1.0 - f32::EPSILON);

    let (x, y, mut z) = if s < center_at {
        let u = smoothstep(0.0, 1.0, s / center_at);
        (
            lerp(path.start[0], path.center[0], u),
            lerp(path.start[1], path.center[1], u),
            lerp(0.0, path.center_depth, u),
        )
    } else {
        let u = smoothstep(0.0, 1.0, (s - center_at) / (1.0 - center_at));
        (
            lerp(path.center[0], path.end[0], u),
            lerp(path.center[1], path.end[1], u),
            lerp(path.center_depth, path.end_depth, u),
        )
    };
    let tail = ((s - fade_out_at) / (1.0 - fade_out_at)).clamp(0.0, 1.0);
    if s >= fade_out_at {
        z = lerp(z, path.vanish_depth, tail);
    }

    let opacity = if s < path.fade_in_until {
        smoothstep(0.0, path.fade_in_until, s)
    } else if s > fade_out_at {
        1.0 - smoothstep(0.0, 1.0, tail)
    } else {
        1.0
    };
    let presence = if s < fade_out_at {
        1.0
    } else {
        1.0 - smoothstep(0.0, 1.0, tail)
    };

    PathPose {
        position: Vec3::new(x + path.offset[0], y + path.offset[1], z),
        opacity,
        scale: 0.7 + 0.3 * opacity,
        presence,
        yaw: t * path.orbit_rate,
    }
}
