//! Sparkling heart-shaped particle field for an HTML canvas.
//!
//! The core (sampling, projection, twinkle, label layout) is plain Rust and
//! runs on the host for tests. The browser shell in `wasm` only exists on
//! `wasm32` and supplies the canvas, the clock and resize events.

pub mod config;
pub mod error;
pub mod label;
pub mod motion;
pub mod particle;
pub mod render;
pub mod sampler;
pub mod scene;
pub mod shape;
pub mod sprite;

pub use config::{Config, Theme};
pub use error::{Error, Result};
pub use particle::{Kind, Particle};
pub use render::{Surface, Viewport};
pub use scene::Scene;
pub use shape::{Circle, Heart, Shape};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;
