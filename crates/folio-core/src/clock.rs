use crate::constants::MAX_FRAME_DT;

/// Monotonic animation time owned by one driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationClock {
    elapsed: f32,
    delta: f32,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by a frame delta in seconds, clamped to `[0, MAX_FRAME_DT]`.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.delta = dt;
        self.elapsed += dt;
        dt
    }

    /// Back to zero; only used when a looping exit sequence wraps around.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.delta = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}
