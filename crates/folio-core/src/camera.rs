//! Perspective camera and bounding boxes.
//!
//! The camera is right-handed and uses the WebGPU clip-space depth range
//! (`perspective_rh`, z in `[0, 1]`).

use crate::constants::*;
use glam::{Mat4, Vec3, Vec4};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box around `points`; `None` when the iterator is empty.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The portfolio's rest framing: slightly above the origin, looking at it.
    pub fn rest(aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(CAMERA_REST_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: sanitize_aspect(aspect),
            fovy_radians: CAMERA_FOV_Y_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    /// Move the camera back far enough that `bounds` fits the vertical field
    /// of view with a margin, and adapt the clip planes to the model's scale.
    pub fn fit_to_bounds(&mut self, bounds: &Aabb) {
        let extent = bounds.max_extent();
        if !extent.is_finite() || extent <= 0.0 {
            return;
        }
        let half_fov = self.fovy_radians * 0.5;
        let distance = extent / (2.0 * half_fov.tan()) * FIT_MARGIN;
        self.eye = Vec3::new(self.eye.x, self.eye.y, distance.max(FIT_MIN_DISTANCE));
        self.znear = CAMERA_NEAR.max(extent / FIT_NEAR_DIVISOR);
        self.zfar = CAMERA_FAR.max(extent * FIT_FAR_MULTIPLIER);
    }

    /// World-space ray through a normalized device coordinate.
    ///
    /// Returns `(origin, direction)`; the direction is not normalized. `None`
    /// when the inverse projection degenerates.
    pub fn ndc_ray(&self, ndc_x: f32, ndc_y: f32) -> Option<(Vec3, Vec3)> {
        let inv = self.view_projection().inverse();
        let near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near.w.abs() < f32::EPSILON || far.w.abs() < f32::EPSILON {
            return None;
        }
        let p0 = near.truncate() / near.w;
        let p1 = far.truncate() / far.w;
        let dir = p1 - p0;
        (p0.is_finite() && dir.is_finite()).then_some((p0, dir))
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
