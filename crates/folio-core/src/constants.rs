// Scene tuning constants shared by the driver presets and the renderer.

// Rest camera
pub const CAMERA_FOV_Y_DEG: f32 = 45.0;
pub const CAMERA_REST_EYE: [f32; 3] = [0.0, 1.2, 8.0];
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;

// Auto-framing against the loaded model's bounds
pub const FIT_MARGIN: f32 = 1.25; // 25% breathing room around the model
pub const FIT_MIN_DISTANCE: f32 = 8.0; // never closer than the rest camera
pub const FIT_NEAR_DIVISOR: f32 = 1000.0;
pub const FIT_FAR_MULTIPLIER: f32 = 10.0;

// Frame timing
pub const MAX_FRAME_DT: f32 = 0.1; // seconds; clamps the jump after a backgrounded tab

// Asset loading
pub const ASSET_LOAD_TIMEOUT_SEC: f64 = 15.0;

// Opacity below which the object is not drawn at all
pub const VISIBILITY_EPSILON: f32 = 0.02;

// Ambient particles inside the 3D scene
pub const AMBIENT_PARTICLE_COUNT: usize = 300;
pub const AMBIENT_PARTICLE_SPAN: [f32; 2] = [60.0, 40.0]; // x, y extents
pub const AMBIENT_PARTICLE_DEPTH: [f32; 2] = [-5.0, -45.0]; // near, far z
pub const AMBIENT_PARTICLE_SPIN: f32 = 0.01; // radians per second about z

// Background warp starfield (2D canvas)
pub const STAR_COUNT: usize = 800;
pub const STAR_FIELD_HALF_WIDTH: f32 = 800.0;
pub const STAR_FIELD_HALF_HEIGHT: f32 = 450.0;
pub const STAR_FIELD_DEPTH: f32 = 1000.0;
pub const STAR_SPEED: f32 = 30.0; // depth units per second
pub const STAR_MAX_RADIUS: f32 = 2.0;

// Contact form notices
pub const CONTACT_SUCCESS_TITLE: &str = "Message sent successfully!";
pub const CONTACT_SUCCESS_DESCRIPTION: &str =
    "Thank you for reaching out. I'll get back to you soon.";
pub const CONTACT_FAILURE_TITLE: &str = "Failed to send message";
