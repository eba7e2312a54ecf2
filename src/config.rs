//! Tunables for the field, grouped the way they are consumed.
//!
//! Everything has a default, and every struct is `#[serde(default)]`, so a JSON
//! override only needs the fields it changes:
//!
//! ```
//! let cfg = heart_field::Config::from_json(r#"{ "population": { "count": 4000 } }"#).unwrap();
//! assert_eq!(cfg.population.count, 4000);
//! assert_eq!(cfg.population.edge_ratio, 0.28);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::motion::{Motion, Shear};
use crate::particle::{ParticleStyle, Range};
use crate::sampler::{Population, RadialBias};
use crate::shape::{Shape, Silhouette};
use crate::sprite::Glyph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub population: Population,
    pub silhouette: Silhouette,
    /// Half-thickness of the field along z, in normalized units.
    pub depth: f64,
    pub motion: Motion,
    pub layout: Layout,
    pub theme: Theme,
    /// Sort sprites far-to-near every frame.
    pub depth_sort: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::volumetric()
    }
}

impl Config {
    /// Dense star cloud with a crisp outline, swinging in 3D.
    pub fn volumetric() -> Self {
        Self {
            population: Population::default(),
            silhouette: Silhouette::default(),
            depth: 0.35,
            motion: Motion::default(),
            layout: Layout::default(),
            theme: Theme::default(),
            depth_sort: true,
        }
    }

    /// Softer dotted heart with a hollow-ish core, leaning side to side.
    pub fn sheared() -> Self {
        Self {
            population: Population {
                count: 10_980,
                edge_ratio: 0.18,
                bias: Some(RadialBias {
                    inner: 0.70,
                    exponent: 1.8,
                }),
                fill: ParticleStyle {
                    radius: Range::new(0.6, 1.6),
                    speed: Range::new(0.9, 2.0),
                    brightness: Range::new(0.35, 1.0),
                    depth_falloff: Range::fixed(1.0),
                },
                edge: ParticleStyle {
                    radius: Range::new(0.9, 2.0),
                    speed: Range::new(1.0, 2.3),
                    brightness: Range::new(0.55, 1.0),
                    depth_falloff: Range::fixed(1.0),
                },
                ..Population::default()
            },
            silhouette: Silhouette::default(),
            depth: 0.35,
            motion: Motion::Shear(Shear::default()),
            layout: Layout {
                base_scale: 0.24,
                heart_size: 1.0,
                offset_y: 0.0,
            },
            theme: Theme {
                glyph: Glyph::Dot,
                twinkle: Twinkle {
                    power: 1.45,
                    floor: 0.12,
                    span: 0.78,
                    gain: 1.0,
                },
                depth_light: Some(0.55),
                glow: Glow {
                    blur: 7.0,
                    alpha: 0.18,
                },
                vignette: Some(Vignette {
                    inner_radius: 30.0,
                    reach: 0.65,
                    alpha: 0.05,
                }),
                label: LabelStyle {
                    size_ratio: 0.22,
                    min_px: 18.0,
                    max_px: 40.0,
                    layers: 7,
                    layer_alpha: 0.05,
                    layer_alpha_step: 0.02,
                    glow_alpha: 0.18,
                    glow_blur: 16.0,
                    ..LabelStyle::default()
                },
                ..Theme::default()
            },
            depth_sort: true,
        }
    }

    /// Parses a JSON override on top of the defaults and validates the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.population;
        if p.count == 0 {
            return Err(Error::invalid("population.count", "must be positive"));
        }
        if !(0.0..=1.0).contains(&p.edge_ratio) {
            return Err(Error::invalid(
                "population.edge_ratio",
                format!("{} is outside [0, 1]", p.edge_ratio),
            ));
        }
        if p.edge_epsilon <= 0.0 {
            return Err(Error::invalid("population.edge_epsilon", "must be positive"));
        }
        if p.edge_jitter < 0.0 {
            return Err(Error::invalid("population.edge_jitter", "must not be negative"));
        }
        if let Some(bias) = &p.bias {
            if !(0.0..=1.0).contains(&bias.inner) || bias.exponent <= 0.0 {
                return Err(Error::invalid(
                    "population.bias",
                    "inner must be in [0, 1] and exponent positive",
                ));
            }
        }
        check_style("population.fill", &p.fill)?;
        check_style("population.edge", &p.edge)?;

        if self.depth < 0.0 {
            return Err(Error::invalid("depth", "must not be negative"));
        }
        match &self.motion {
            Motion::Orbit(o) => {
                let b = self.silhouette.bounds();
                let reach_x = b.min_x.abs().max(b.max_x.abs());
                let reach_y = b.min_y.abs().max(b.max_y.abs());
                let reach = (reach_x * reach_x + reach_y * reach_y + self.depth * self.depth).sqrt();
                if o.camera_distance <= reach {
                    return Err(Error::invalid(
                        "motion.camera_distance",
                        format!("{} does not clear the field reach {:.3}", o.camera_distance, reach),
                    ));
                }
            }
            Motion::Shear(s) => {
                if 1.0 - self.depth * s.depth_zoom <= 0.0 {
                    return Err(Error::invalid(
                        "motion.depth_zoom",
                        "far particles would collapse to zero size",
                    ));
                }
            }
        }
        if self.layout.base_scale <= 0.0 || self.layout.heart_size <= 0.0 {
            return Err(Error::invalid("layout", "scales must be positive"));
        }
        let theme = &self.theme;
        let tw = &theme.twinkle;
        // a non-positive power sends 0^power to inf and the alpha to NaN
        if tw.power.is_nan() || tw.power <= 0.0 {
            return Err(Error::invalid("theme.twinkle", "power must be positive"));
        }
        if !unit(tw.floor) || !unit(tw.span) || !unit(tw.gain) {
            return Err(Error::invalid(
                "theme.twinkle",
                "floor, span and gain must be in [0, 1]",
            ));
        }
        if theme.depth_light.is_some_and(|min| !unit(min)) {
            return Err(Error::invalid("theme.depth_light", "must be in [0, 1]"));
        }
        if !unit(theme.glow.alpha) || theme.glow.blur < 0.0 {
            return Err(Error::invalid(
                "theme.glow",
                "alpha must be in [0, 1] and blur not negative",
            ));
        }
        if theme.vignette.as_ref().is_some_and(|v| !unit(v.alpha)) {
            return Err(Error::invalid("theme.vignette", "alpha must be in [0, 1]"));
        }
        let label = &theme.label;
        if label.min_px > label.max_px {
            return Err(Error::invalid("theme.label", "min_px exceeds max_px"));
        }
        Ok(())
    }
}

// NaN fails this too
fn unit(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

fn check_style(field: &'static str, style: &ParticleStyle) -> Result<()> {
    let ranges = [
        style.radius,
        style.speed,
        style.brightness,
        style.depth_falloff,
    ];
    if ranges.iter().any(|r| !r.is_ordered()) {
        return Err(Error::invalid(field, "range min exceeds max"));
    }
    if style.radius.min <= 0.0 || style.speed.min <= 0.0 {
        return Err(Error::invalid(field, "radius and speed must be positive"));
    }
    if style.brightness.min <= 0.0 || style.brightness.max > 1.0 {
        return Err(Error::invalid(field, "brightness must lie in (0, 1]"));
    }
    Ok(())
}

/// Placement of the field on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Pixels per normalized unit, as a fraction of the shorter viewport side.
    pub base_scale: f64,
    pub heart_size: f64,
    /// Vertical shift of the center in CSS pixels.
    pub offset_y: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            base_scale: 0.30,
            heart_size: 0.92,
            offset_y: 0.0,
        }
    }
}

/// Alpha curve: `(floor + span·tw)·brightness·gain`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Twinkle {
    pub power: f64,
    pub floor: f64,
    pub span: f64,
    pub gain: f64,
}

impl Default for Twinkle {
    fn default() -> Self {
        Self {
            power: 1.0,
            floor: 0.35,
            span: 0.65,
            gain: 0.98,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glow {
    /// Shadow blur in CSS pixels at perspective 1.
    pub blur: f64,
    pub alpha: f64,
}

impl Default for Glow {
    fn default() -> Self {
        Self {
            blur: 6.0,
            alpha: 0.18,
        }
    }
}

/// Soft radial brightening behind the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vignette {
    pub inner_radius: f64,
    /// Outer radius as a fraction of the longer viewport side.
    pub reach: f64,
    pub alpha: f64,
}

impl Default for Vignette {
    fn default() -> Self {
        Self {
            inner_radius: 30.0,
            reach: 0.62,
            alpha: 0.06,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub text: String,
    pub font_family: String,
    pub weight: u16,
    /// Font size as a fraction of the field scale, clamped to `[min_px, max_px]`.
    pub size_ratio: f64,
    pub min_px: f64,
    pub max_px: f64,
    /// Extrusion layers behind the face; 0 disables the effect.
    pub layers: usize,
    pub layer_alpha: f64,
    pub layer_alpha_step: f64,
    pub face_alpha: f64,
    pub glow_alpha: f64,
    pub glow_blur: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            text: "Thành Đạt & Thanh Thúy".to_owned(),
            font_family: r#"system-ui, -apple-system, "Segoe UI", Arial, sans-serif"#.to_owned(),
            weight: 800,
            size_ratio: 0.12,
            min_px: 16.0,
            max_px: 58.0,
            layers: 12,
            layer_alpha: 0.08,
            layer_alpha_step: 0.012,
            face_alpha: 0.98,
            glow_alpha: 0.26,
            glow_blur: 18.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub color: [u8; 3],
    pub glyph: Glyph,
    pub twinkle: Twinkle,
    /// Dim far particles down to this factor; `None` keeps depth out of alpha.
    pub depth_light: Option<f64>,
    pub glow: Glow,
    pub vignette: Option<Vignette>,
    pub label: LabelStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            glyph: Glyph::Star,
            twinkle: Twinkle::default(),
            depth_light: None,
            glow: Glow::default(),
            vignette: Some(Vignette::default()),
            label: LabelStyle::default(),
        }
    }
}

impl Theme {
    /// CSS `rgba()` string in the theme color.
    pub fn rgba(&self, alpha: f64) -> String {
        let [r, g, b] = self.color;
        format!("rgba({},{},{},{:.3})", r, g, b, alpha.clamp(0.0, 1.0))
    }
}
