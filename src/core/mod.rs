// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static FX_WGSL: &str = include_str!("../../shaders/fx.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
