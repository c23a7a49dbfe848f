//! Easing and interpolation helpers.
//!
//! All functions are total: normalized progress is clamped to `[0, 1]` and a
//! degenerate edge range behaves as a step instead of dividing by zero.

use glam::Vec3;

#[inline]
fn normalized(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span == 0.0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    ((x - edge0) / span).clamp(0.0, 1.0)
}

/// Hermite blend `t²(3 - 2t)` of `x` between the two edges.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = normalized(edge0, edge1, x);
    t * t * (3.0 - 2.0 * t)
}

/// Quintic blend `t³(t(6t - 15) + 10)`; zero first and second derivative at the edges.
#[inline]
pub fn smootherstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = normalized(edge0, edge1, x);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k * k / 2.0
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Exponential smoothing toward `target`, closing `1 - e^(-rate·dt)` of the gap.
///
/// Two half-length steps land on the same value as one full step, so motion is
/// independent of the display refresh rate.
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let alpha = 1.0 - (-rate.max(0.0) * dt.max(0.0)).exp();
    current + (target - current) * alpha
}

#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, rates: Vec3, dt: f32) -> Vec3 {
    Vec3::new(
        damp(current.x, target.x, rates.x, dt),
        damp(current.y, target.y, rates.y, dt),
        damp(current.z, target.z, rates.z, dt),
    )
}
