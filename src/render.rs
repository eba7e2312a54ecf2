//! Per-frame painting.
//!
//! `render_frame` is a pure function of elapsed time and the particle set; all
//! host state lives behind [`Surface`].

use crate::config::{Config, Layout, Theme, Vignette};
use crate::error::Result;
use crate::label::{self, LabelPlan};
use crate::motion::Pose;
use crate::particle::Particle;
use crate::sprite::{sort_far_to_near, Glyph, Sprite};

/// Drawing surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Device pixels per CSS pixel.
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: pixel_ratio.clamp(1.0, 2.0),
        }
    }

    /// Backing store size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }
}

/// Screen placement of the normalized field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub cx: f64,
    pub cy: f64,
    /// CSS pixels per normalized unit.
    pub scale_px: f64,
}

impl Stage {
    pub fn new(viewport: &Viewport, layout: &Layout) -> Self {
        Self {
            cx: viewport.width / 2.0,
            cy: viewport.height / 2.0 + layout.offset_y,
            scale_px: viewport.width.min(viewport.height) * layout.base_scale * layout.heart_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VignettePlan {
    pub cx: f64,
    pub cy: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub inner_color: String,
    pub outer_color: String,
}

impl VignettePlan {
    fn new(v: &Vignette, stage: &Stage, viewport: &Viewport, theme: &Theme) -> Self {
        Self {
            cx: stage.cx,
            cy: stage.cy,
            inner_radius: v.inner_radius,
            outer_radius: viewport.width.max(viewport.height) * v.reach,
            inner_color: theme.rgba(v.alpha),
            outer_color: "rgba(0,0,0,0)".to_owned(),
        }
    }
}

pub trait Surface {
    fn clear(&mut self, viewport: &Viewport) -> Result<()>;
    fn vignette(&mut self, plan: &VignettePlan) -> Result<()>;
    fn sprite(&mut self, sprite: &Sprite, glyph: Glyph, theme: &Theme) -> Result<()>;
    fn label(&mut self, plan: &LabelPlan, theme: &Theme) -> Result<()>;
}

/// Final alpha for `p` at time `t`, in `[0, 1]`.
pub fn sprite_alpha(p: &Particle, t: f64, theme: &Theme, depth: f64) -> f64 {
    let tw = theme.twinkle;
    let light = match theme.depth_light {
        Some(min) if depth > 0.0 => {
            let k = ((p.z + depth) / (2.0 * depth)).clamp(0.0, 1.0);
            min + k * (1.0 - min)
        }
        _ => 1.0,
    };
    ((tw.floor + tw.span * p.twinkle(t, tw.power)) * p.brightness * light * tw.gain)
        .clamp(0.0, 1.0)
}

/// Projects every particle for time `t` into `out`, replacing its contents.
pub fn project_all(
    particles: &[Particle],
    config: &Config,
    stage: &Stage,
    pose: &Pose,
    t: f64,
    out: &mut Vec<Sprite>,
) {
    out.clear();
    out.reserve(particles.len());
    let theme = &config.theme;
    out.extend(particles.iter().map(|p| {
        let pr = config.motion.project(p, pose);
        let k = stage.scale_px * pr.perspective;
        Sprite {
            x: stage.cx + pr.x * k,
            y: stage.cy + pose.bob - pr.y * k,
            radius: p.radius * pr.perspective,
            alpha: sprite_alpha(p, t, theme, config.depth),
            glow: theme.glow.blur * pr.perspective,
            depth: pr.depth,
        }
    }));
}

/// Paints one frame: background, particles back to front, then the label on
/// top. Returns the number of sprites painted.
pub fn render_frame<S: Surface + ?Sized>(
    particles: &[Particle],
    config: &Config,
    viewport: &Viewport,
    t: f64,
    surface: &mut S,
    scratch: &mut Vec<Sprite>,
) -> Result<usize> {
    let theme = &config.theme;
    let stage = Stage::new(viewport, &config.layout);
    let pose = config.motion.pose(t);

    surface.clear(viewport)?;
    if let Some(v) = &theme.vignette {
        surface.vignette(&VignettePlan::new(v, &stage, viewport, theme))?;
    }

    project_all(particles, config, &stage, &pose, t, scratch);
    if config.depth_sort {
        sort_far_to_near(scratch);
    }
    for sprite in scratch.iter() {
        surface.sprite(sprite, theme.glyph, theme)?;
    }

    if !theme.label.text.is_empty() {
        let plan = label::plan(
            &theme.label,
            &config.motion,
            &pose,
            (stage.cx, stage.cy),
            stage.scale_px,
        );
        surface.label(&plan, theme)?;
    }
    Ok(scratch.len())
}
