// Page wiring and browser-side tuning. Kept free of web-sys/wgpu types so the
// host tests can include this file directly.

// DOM contract
pub const BACKGROUND_CANVAS_ID: &str = "space-background";
pub const SHIP_CANVAS_ID: &str = "ship-canvas";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const TOAST_REGION_ID: &str = "toast-region";

// Attributes read from the ship canvas and the form
pub const VARIANT_ATTR: &str = "data-variant";
pub const MODEL_URL_ATTR: &str = "data-model-url";
pub const SCENE_CONFIG_ATTR: &str = "data-scene-config";
pub const ENDPOINT_ATTR: &str = "data-endpoint";

pub const DEFAULT_MODEL_URL: &str = "/models/spaceship.glb";
pub const DEFAULT_CONTACT_ENDPOINT: &str = "/api/contact";

// Backing store never exceeds 2x CSS pixels
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Toasts stay up this long (ms)
pub const TOAST_LIFETIME_MS: i32 = 5_000;

// Starfield canvas styling
pub const STARFIELD_SMEAR_FILL: &str = "rgba(0, 0, 0, 0.2)";
pub const STAR_FILL: &str = "rgba(255, 255, 255, 0.9)";
pub const STAR_TRAIL_STROKE: &str = "rgba(180, 210, 255, 0.55)";
pub const STARFIELD_SEED: u64 = 0x5EED_57A2;

// Scene lighting (world space, pointing from the light toward the scene)
pub const KEY_LIGHT_DIR: [f32; 3] = [-0.4, -0.7, -0.6];

// Ambient particles
pub const PARTICLE_SIZE: f32 = 0.06;
pub const PARTICLE_COLOR: [f32; 4] = [0.65, 0.8, 1.0, 0.55];

// Streak colour (rgb); alpha comes from the exit state
pub const STREAK_COLOR: [f32; 3] = [0.7, 0.85, 1.0];

// Composite clear: fully transparent so the page shows through
pub const CLEAR_ALPHA: f64 = 0.0;

// Label shown on the submit button while a message is in flight
pub const SUBMIT_BUSY_LABEL: &str = "Sending...";
