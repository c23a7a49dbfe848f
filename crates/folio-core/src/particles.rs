//! Ambient particles for the 3D scene and the 2D warp starfield behind the page.

use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

/// Scatter points in a slab behind the ship.
pub fn ambient_particles(count: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let [span_x, span_y] = AMBIENT_PARTICLE_SPAN;
    let [near, far] = AMBIENT_PARTICLE_DEPTH;
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * span_x,
                (rng.gen::<f32>() - 0.5) * span_y,
                near + rng.gen::<f32>() * (far - near),
            )
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub prev_z: f32,
}

/// Screen-space placement of one star and its trail start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSprite {
    pub x: f32,
    pub y: f32,
    pub prev_x: f32,
    pub prev_y: f32,
    pub radius: f32,
}

/// Stars flying toward the viewer; a star that passes the screen plane
/// respawns at the far end of the field.
pub struct Starfield {
    stars: Vec<Star>,
    speed: f32,
    rng: StdRng,
}

impl Starfield {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| {
                let z = rng.gen_range(1.0..=STAR_FIELD_DEPTH);
                let (x, y) = random_xy(&mut rng);
                Star { x, y, z, prev_z: z }
            })
            .collect();
        Self {
            stars,
            speed: STAR_SPEED,
            rng,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Advance by `dt` seconds, clamped to `MAX_FRAME_DT` like the scene clock.
    ///
    /// A star that crosses the screen plane wraps to the far end, keeping the
    /// distance it overshot so the field never bunches into one depth.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        let dz = self.speed * dt;
        for star in &mut self.stars {
            star.prev_z = star.z;
            star.z -= dz;
            if star.z <= 0.0 {
                let (x, y) = random_xy(&mut self.rng);
                let z = (star.z + STAR_FIELD_DEPTH).clamp(f32::EPSILON, STAR_FIELD_DEPTH);
                *star = Star { x, y, z, prev_z: z };
            }
        }
    }

    /// Perspective placement on a `width`×`height` canvas.
    pub fn project(star: &Star, width: f32, height: f32) -> StarSprite {
        let (hw, hh) = (width * 0.5, height * 0.5);
        StarSprite {
            x: star.x / star.z * hw + hw,
            y: star.y / star.z * hh + hh,
            prev_x: star.x / star.prev_z * hw + hw,
            prev_y: star.y / star.prev_z * hh + hh,
            radius: ((1.0 - star.z / STAR_FIELD_DEPTH) * STAR_MAX_RADIUS).max(0.0),
        }
    }
}

fn random_xy(rng: &mut StdRng) -> (f32, f32) {
    (
        rng.gen::<f32>() * STAR_FIELD_HALF_WIDTH * 2.0 - STAR_FIELD_HALF_WIDTH,
        rng.gen::<f32>() * STAR_FIELD_HALF_HEIGHT * 2.0 - STAR_FIELD_HALF_HEIGHT,
    )
}
