//! Name label drawn inside the silhouette.
//!
//! There is no real 3D text. The face is sheared and squashed with the pose,
//! and a stack of copies offset along the extrusion vector gives it a fake depth.

use crate::config::LabelStyle;
use crate::motion::{Motion, Pose};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayer {
    pub dx: f64,
    pub dy: f64,
    pub alpha: f64,
}

/// Everything a surface needs to draw the label for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlan {
    pub text: String,
    /// CSS font shorthand.
    pub font: String,
    pub font_px: f64,
    pub x: f64,
    pub y: f64,
    /// Canvas 2×2 matrix `[a, b, c, d]` applied after translating to `(x, y)`.
    pub matrix: [f64; 4],
    /// Extrusion copies, farthest first.
    pub layers: Vec<TextLayer>,
    pub face_alpha: f64,
    pub glow_alpha: f64,
    pub glow_blur: f64,
}

pub fn font_px(style: &LabelStyle, scale_px: f64) -> f64 {
    (scale_px * style.size_ratio).clamp(style.min_px, style.max_px)
}

/// Lays out the label around `(cx, cy)`.
///
/// Layer `k` of `n` (1 = farthest) sits at `(n − k + 1)/n` of the extrusion
/// vector with alpha `layer_alpha + k·layer_alpha_step`, so the stack shrinks
/// towards the face while getting more opaque.
pub fn plan(
    style: &LabelStyle,
    motion: &Motion,
    pose: &Pose,
    (cx, cy): (f64, f64),
    scale_px: f64,
) -> LabelPlan {
    let frame = motion.label_frame(pose, style.layers);
    let size = font_px(style, scale_px);
    let n = style.layers;
    let (ex, ey) = frame.extrusion;

    let layers = (1..=n)
        .map(|k| {
            let reach = (n - k + 1) as f64 / n as f64;
            TextLayer {
                dx: ex * reach,
                dy: ey * reach,
                alpha: (style.layer_alpha + k as f64 * style.layer_alpha_step).min(1.0),
            }
        })
        .collect();

    LabelPlan {
        text: style.text.clone(),
        font: format!("{} {:.1}px {}", style.weight, size, style.font_family),
        font_px: size,
        x: cx,
        y: cy + frame.lift,
        matrix: frame.matrix,
        layers,
        face_alpha: style.face_alpha,
        glow_alpha: style.glow_alpha,
        glow_blur: style.glow_blur,
    }
}
