use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Point primitive painted for each particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Dot,
    #[default]
    Star,
    /// Star with thin horizontal and vertical rays.
    Sparkle,
}

pub const STAR_SPIKES: usize = 5;
pub const STAR_INNER_RATIO: f64 = 0.45;
/// Ray half-length relative to the star's outer radius.
pub const SPARKLE_RAY: f64 = 2.2;

/// One particle ready to paint, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
    pub glow: f64,
    pub depth: f64,
}

/// Outline of a star with `spikes` points, starting straight up and alternating
/// outer and inner vertices.
pub fn star_vertices(cx: f64, cy: f64, outer: f64, spikes: usize) -> Vec<(f64, f64)> {
    let inner = outer * STAR_INNER_RATIO;
    let step = PI / spikes as f64;
    let mut rot = -FRAC_PI_2;
    let mut out = Vec::with_capacity(spikes * 2);
    for _ in 0..spikes {
        out.push((cx + rot.cos() * outer, cy + rot.sin() * outer));
        rot += step;
        out.push((cx + rot.cos() * inner, cy + rot.sin() * inner));
        rot += step;
    }
    out
}

/// Painter's-algorithm ordering: farthest first, so nearer sprites paint over
/// them. Runs every frame; O(N log N) is fine at tens of thousands of sprites,
/// beyond that a coarse depth bucketing would be cheaper.
pub fn sort_far_to_near(sprites: &mut [Sprite]) {
    sprites.sort_unstable_by(|a, b| a.depth.total_cmp(&b.depth));
}
