//! Screen-ratio anchor projected into world space.

use crate::camera::Camera;

const PARALLEL_EPSILON: f32 = 1e-6;

/// Projects a horizontal screen ratio (0 = left edge, 1 = right edge) onto a
/// constant-depth plane and caches the resulting world X.
///
/// The cached value is only refreshed by [`AnchorProjector::recompute`], which
/// callers invoke on resize and after the camera framing changes, never per
/// frame.
#[derive(Clone, Debug)]
pub struct AnchorProjector {
    ratio: f32,
    depth: f32,
    cached: f32,
}

impl AnchorProjector {
    pub fn new(ratio: f32, depth: f32) -> Self {
        Self {
            ratio,
            depth,
            cached: 0.0,
        }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Last computed anchor X.
    pub fn value(&self) -> f32 {
        self.cached
    }

    /// Intersect the ray through the anchor ratio with the `z = depth` plane.
    ///
    /// A ray parallel to the plane (or an unusable projection) keeps the
    /// previously cached value.
    pub fn recompute(&mut self, camera: &Camera) -> f32 {
        let ndc_x = self.ratio * 2.0 - 1.0;
        let Some((origin, dir)) = camera.ndc_ray(ndc_x, 0.0) else {
            log::warn!("[anchor] degenerate projection; keeping x={:.3}", self.cached);
            return self.cached;
        };
        let dir = dir.normalize_or_zero();
        if dir.z.abs() < PARALLEL_EPSILON {
            log::warn!("[anchor] ray parallel to depth plane; keeping x={:.3}", self.cached);
            return self.cached;
        }
        let t = (self.depth - origin.z) / dir.z;
        let x = origin.x + dir.x * t;
        if x.is_finite() {
            self.cached = x;
        }
        self.cached
    }
}
