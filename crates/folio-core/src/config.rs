//! Scene configuration.
//!
//! A [`SceneConfig`] is handed to the driver at construction; there are no
//! global switches. Presets cover the variants the page uses and every field
//! can be overridden from JSON merged over the chosen preset.

use crate::constants::ASSET_LOAD_TIMEOUT_SEC;
use crate::error::ConfigError;
use crate::input::ScrollRange;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Horizontal screen ratio the ship rests at (0 = left, 1 = right).
    pub anchor_ratio: f32,
    /// World z of the plane the anchor is projected onto.
    pub anchor_depth: f32,
    pub rest_y: f32,
    pub idle: IdlePath,
    pub motion: MotionTuning,
    pub entry: Option<EntryConfig>,
    pub exit: ExitConfig,
    /// Fade the ship's materials; when false the whole canvas fades instead.
    pub fade_materials: bool,
    /// Keep the camera trained on the ship instead of the origin.
    pub camera_tracking: bool,
    pub camera_tracking_rate: f32,
    pub glow: GlowConfig,
    /// Base tone-mapping exposure.
    pub exposure: f32,
    pub load_timeout_sec: f64,
    pub scroll: ScrollRange,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            anchor_ratio: 0.72,
            anchor_depth: 0.0,
            rest_y: -0.2,
            idle: IdlePath::Anchored,
            motion: MotionTuning::default(),
            entry: Some(EntryConfig::default()),
            exit: ExitConfig {
                trigger: ExitTrigger::Scroll,
                ..ExitConfig::default()
            },
            fade_materials: true,
            camera_tracking: false,
            camera_tracking_rate: 6.0,
            glow: GlowConfig::default(),
            exposure: 1.2,
            load_timeout_sec: ASSET_LOAD_TIMEOUT_SEC,
            scroll: ScrollRange::default(),
            seed: 7,
        }
    }
}

impl SceneConfig {
    /// Ship rests at the right of the hero and dives away as the page scrolls.
    pub fn hero() -> Self {
        Self::default()
    }

    /// Endless keyframed fly-through with the camera following the ship.
    pub fn cruise() -> Self {
        Self {
            idle: IdlePath::Cruise(CruisePath::default()),
            motion: MotionTuning {
                bank_per_velocity: 0.25 / 60.0,
                ..MotionTuning::default()
            },
            entry: None,
            exit: ExitConfig {
                trigger: ExitTrigger::Never,
                ..ExitConfig::default()
            },
            camera_tracking: true,
            ..Self::default()
        }
    }

    /// Idles for a while, jumps to hyperspace, and comes back around.
    pub fn hyperjump() -> Self {
        Self {
            exit: ExitConfig {
                trigger: ExitTrigger::Elapsed { after: 9.0 },
                looping: true,
                ..ExitConfig::default()
            },
            fade_materials: false,
            ..Self::default()
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hero" | "" => Some(Self::hero()),
            "cruise" => Some(Self::cruise()),
            "hyperjump" => Some(Self::hyperjump()),
            _ => None,
        }
    }

    /// Build the config for a mount from its variant name and optional JSON
    /// overrides. Overrides are merged over the preset field by field, so
    /// `{"exit": {"looping": true}}` keeps every other exit setting.
    pub fn resolve(variant: Option<&str>, overrides: Option<&str>) -> Result<Self, ConfigError> {
        let variant = variant.unwrap_or("");
        let base = Self::preset(variant).ok_or_else(|| ConfigError::UnknownVariant(variant.to_owned()))?;
        let Some(raw) = overrides.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(base);
        };
        let patch: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| ConfigError::Overrides(e.to_string()))?;
        let mut merged =
            serde_json::to_value(&base).map_err(|e| ConfigError::Overrides(e.to_string()))?;
        merge_json(&mut merged, patch);
        serde_json::from_value(merged).map_err(|e| ConfigError::Overrides(e.to_string()))
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// How the ship moves once it is in its steady state.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdlePath {
    /// Rest at the projected anchor with a vertical bob and horizontal sway.
    Anchored,
    /// Loop through three keyframes, fading in and out at the ends.
    Cruise(CruisePath),
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CruisePath {
    /// Full passes per second.
    pub speed: f32,
    pub start: [f32; 2],
    pub center: [f32; 2],
    pub end: [f32; 2],
    /// Fraction of the pass spent reaching the centre keyframe.
    pub center_at: f32,
    pub center_depth: f32,
    pub end_depth: f32,
    /// Depth the ship is pulled to over the final stretch.
    pub vanish_depth: f32,
    /// Fraction of the pass where fade-out and the depth pull begin.
    pub fade_out_at: f32,
    pub fade_in_until: f32,
    pub offset: [f32; 2],
    /// Slow yaw drift in radians per second.
    pub orbit_rate: f32,
}

impl Default for CruisePath {
    fn default() -> Self {
        Self {
            speed: 0.14,
            start: [6.0, -1.0],
            center: [0.0, 0.2],
            end: [-12.0, 2.0],
            center_at: 0.6,
            center_depth: -1.2,
            end_depth: -6.0,
            vanish_depth: -16.0,
            fade_out_at: 0.8,
            fade_in_until: 0.12,
            offset: [-5.5, 0.6],
            orbit_rate: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionTuning {
    pub bob_amplitude: f32,
    /// Angular frequency, radians per second.
    pub bob_frequency: f32,
    pub sway_amplitude: f32,
    pub sway_frequency: f32,
    /// Pitch per unit of vertical pointer offset.
    pub tilt_x: f32,
    /// Yaw per unit of horizontal pointer offset.
    pub tilt_y: f32,
    /// Damping rates per axis (x, y, z/bank), per second.
    pub rotation_rates: [f32; 3],
    /// Roll per world unit per second of horizontal velocity.
    pub bank_per_velocity: f32,
    pub bank_limit: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            bob_amplitude: 0.25,
            bob_frequency: 1.2,
            sway_amplitude: 0.15,
            sway_frequency: 0.55,
            tilt_x: 0.25,
            tilt_y: 0.35,
            rotation_rates: [5.0, 4.0, 8.0],
            bank_per_velocity: 0.3,
            bank_limit: 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Offset from the resting position the ship flies in from.
    pub from_offset: Vec3,
    pub duration: f32,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            from_offset: Vec3::new(6.0, -1.0, -2.0),
            duration: 2.4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExitTrigger {
    Never,
    /// Start a timed exit after this many seconds of idling.
    Elapsed { after: f32 },
    /// Exit progress follows the page scroll progress.
    Scroll,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExitConfig {
    pub trigger: ExitTrigger,
    /// Length of a timed exit in seconds.
    pub duration: f32,
    pub dive_depth: f32,
    pub min_scale: f32,
    /// Extra exposure at the peak of the jump flash.
    pub flash: f32,
    pub streak_length: f32,
    pub streak_count: usize,
    /// Wrap back to the start once the exit completes.
    pub looping: bool,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            trigger: ExitTrigger::Never,
            duration: 1.6,
            dive_depth: 18.0,
            min_scale: 0.05,
            flash: 1.6,
            streak_length: 6.0,
            streak_count: 48,
            looping: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Emitter position in the ship's local frame.
    pub offset: Vec3,
    pub color: [f32; 3],
    pub base_intensity: f32,
    pub pulse_amplitude: f32,
    pub pulse_frequency: f32,
    pub size: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 0.05, 1.1),
            color: [0.45, 0.75, 1.0],
            base_intensity: 1.4,
            pulse_amplitude: 0.35,
            pulse_frequency: 6.0,
            size: 0.7,
        }
    }
}
