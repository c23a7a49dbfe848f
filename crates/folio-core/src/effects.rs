//! Cosmetic emitters that follow the ship: engine glow and hyperjump streaks.

use crate::config::GlowConfig;
use glam::{Mat4, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlowEmitter {
    pub position: Vec3,
    pub intensity: f32,
    pub opacity: f32,
    pub size: f32,
    pub color: [f32; 3],
}

impl GlowEmitter {
    /// Place the emitter at its local offset under `transform` and pulse it.
    pub fn update(&mut self, cfg: &GlowConfig, transform: Mat4, object_opacity: f32, time: f32) {
        self.position = transform.transform_point3(cfg.offset);
        self.intensity =
            cfg.base_intensity + cfg.pulse_amplitude * (time * cfg.pulse_frequency).sin();
        let peak = (cfg.base_intensity + cfg.pulse_amplitude.abs()).max(f32::EPSILON);
        self.opacity = (self.intensity / peak).clamp(0.0, 1.0) * object_opacity.clamp(0.0, 1.0);
        let (scale, _, _) = transform.to_scale_rotation_translation();
        self.size = cfg.size * scale.x.abs();
        self.color = cfg.color;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Streak {
    dir: Vec3,
    inner: f32,
    stretch: f32,
}

/// Light-speed streaks radiating from the ship during the jump.
#[derive(Clone, Debug)]
pub struct StreakField {
    streaks: Vec<Streak>,
    pub length: f32,
    pub opacity: f32,
}

impl StreakField {
    /// Seeded set of directions in a cone opening toward the viewer (+z).
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let streaks = (0..count)
            .map(|_| {
                let angle = rng.gen::<f32>() * TAU;
                let spread = rng.gen_range(0.15..1.0);
                Streak {
                    dir: Vec3::new(angle.cos() * spread, angle.sin() * spread, 1.4).normalize(),
                    inner: rng.gen_range(0.1..0.6),
                    stretch: rng.gen_range(0.5..1.0),
                }
            })
            .collect();
        Self {
            streaks,
            length: 0.0,
            opacity: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.length > 0.0 && self.opacity > 0.0
    }

    /// Line segments in world space, starting near `origin`.
    pub fn segments(&self, origin: Vec3) -> Vec<[Vec3; 2]> {
        if !self.is_active() {
            return Vec::new();
        }
        self.streaks
            .iter()
            .map(|s| {
                let start = origin + s.dir * s.inner;
                [start, start + s.dir * self.length * s.stretch]
            })
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct EffectState {
    pub glow: GlowEmitter,
    pub streaks: StreakField,
}

impl EffectState {
    pub fn new(streak_count: usize, seed: u64) -> Self {
        Self {
            glow: GlowEmitter::default(),
            streaks: StreakField::new(streak_count, seed),
        }
    }

    pub fn hide(&mut self) {
        self.glow.opacity = 0.0;
        self.glow.intensity = 0.0;
        self.streaks.length = 0.0;
        self.streaks.opacity = 0.0;
    }
}
