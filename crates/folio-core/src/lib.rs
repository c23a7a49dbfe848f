//! Platform-free logic behind the portfolio front-end.
//!
//! Everything in here is plain Rust over `glam` math so it can be exercised on
//! the host. The wasm crate at the workspace root owns the DOM, WebGPU and
//! fetch plumbing and feeds this crate with plain values.

pub mod anchor;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod contact;
pub mod driver;
pub mod easing;
pub mod effects;
pub mod error;
pub mod input;
pub mod loader;
pub mod model;
pub mod particles;

pub use anchor::*;
pub use camera::*;
pub use clock::*;
pub use config::*;
pub use contact::*;
pub use driver::*;
pub use effects::*;
pub use error::*;
pub use input::*;
pub use loader::*;
pub use model::*;
pub use particles::*;
