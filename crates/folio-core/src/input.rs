//! Input state written by the DOM listeners and snapshotted once per frame.

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Reference rectangle for pointer normalization, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Pointer position in `[-1, 1]` per axis, y pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn from_client(client_x: f32, client_y: f32, rect: ClientRect) -> Self {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Self::default();
        }
        let u = (client_x - rect.left) / rect.width;
        let v = (client_y - rect.top) / rect.height;
        Self {
            x: (u * 2.0 - 1.0).clamp(-1.0, 1.0),
            y: -(v * 2.0 - 1.0).clamp(-1.0, 1.0),
        }
    }
}

/// Where scroll-driven effects start and how many pixels they take to finish.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ScrollRange {
    pub start: f32,
    pub span: f32,
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self {
            start: 120.0,
            span: 600.0,
        }
    }
}

/// Scroll progress in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub fn from_offset(offset: f32, range: ScrollRange) -> Self {
        if !offset.is_finite() {
            return Self(0.0);
        }
        if range.span <= 0.0 {
            return Self(if offset >= range.start { 1.0 } else { 0.0 });
        }
        Self(((offset - range.start) / range.span).clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Immutable copy of every input cell, taken at the start of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub pointer: PointerState,
    pub scroll: ScrollProgress,
    pub viewport: Viewport,
}
