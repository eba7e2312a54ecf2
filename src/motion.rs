//! Time-varying pose and particle projection.
//!
//! Motion is always a bounded oscillation around the rest pose. A full turn
//! would show the silhouette edge-on and lose the shape.

use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// `sin(t·frequency)·amplitude`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Oscillator {
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }

    #[inline]
    pub fn value(&self, t: f64) -> f64 {
        (t * self.frequency).sin() * self.amplitude
    }
}

/// Swing around Y then X, seen through a pinhole camera on the +z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orbit {
    pub yaw: Oscillator,
    pub pitch: Oscillator,
    /// Camera distance in normalized units; must exceed every particle's reach.
    pub camera_distance: f64,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            yaw: Oscillator::new(0.62, 0.55),
            pitch: Oscillator::new(0.46, 0.22),
            camera_distance: 3.2,
        }
    }
}

/// Horizontal shear that leans the top of the silhouette, plus a vertical bob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shear {
    pub sway: Oscillator,
    /// Shear factor applied per unit of height.
    pub shear: f64,
    /// Vertical bob in CSS pixels.
    pub bob: Oscillator,
    /// Screen zoom per unit of depth.
    pub depth_zoom: f64,
}

impl Default for Shear {
    fn default() -> Self {
        Self {
            sway: Oscillator::new(0.8, 0.22),
            shear: 0.55,
            bob: Oscillator::new(0.95, 4.0),
            depth_zoom: 0.55,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    Orbit(Orbit),
    Shear(Shear),
}

impl Default for Motion {
    fn default() -> Self {
        Motion::Orbit(Orbit::default())
    }
}

/// Angles and offsets for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub yaw: f64,
    pub pitch: f64,
    pub sway: f64,
    /// Vertical screen offset in CSS pixels.
    pub bob: f64,
}

/// A particle after the pose transform, still in normalized units (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Larger is nearer the viewer.
    pub depth: f64,
    /// Screen-space magnification from depth.
    pub perspective: f64,
}

/// How the label follows the pose: a 2×2 canvas matrix `[a, b, c, d]`, the
/// screen offset of the deepest extrusion layer, and a vertical lift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFrame {
    pub matrix: [f64; 4],
    pub extrusion: (f64, f64),
    pub lift: f64,
}

impl Motion {
    pub fn pose(&self, t: f64) -> Pose {
        match self {
            Motion::Orbit(o) => Pose {
                yaw: o.yaw.value(t),
                pitch: o.pitch.value(t),
                ..Pose::default()
            },
            Motion::Shear(s) => Pose {
                sway: s.sway.value(t),
                bob: s.bob.value(t),
                ..Pose::default()
            },
        }
    }

    #[inline]
    pub fn project(&self, p: &Particle, pose: &Pose) -> Projected {
        match self {
            Motion::Orbit(o) => {
                let (sy, cy) = pose.yaw.sin_cos();
                let x = p.x * cy + p.z * sy;
                let z = -p.x * sy + p.z * cy;

                let (sx, cx) = pose.pitch.sin_cos();
                let y = p.y * cx - z * sx;
                let z = p.y * sx + z * cx;

                Projected {
                    x,
                    y,
                    depth: z,
                    perspective: o.camera_distance / (o.camera_distance - z),
                }
            }
            Motion::Shear(s) => Projected {
                x: p.x + p.y * s.shear * pose.sway.sin(),
                y: p.y,
                depth: p.z,
                perspective: 1.0 + p.z * s.depth_zoom,
            },
        }
    }

    pub fn label_frame(&self, pose: &Pose, layers: usize) -> LabelFrame {
        match self {
            Motion::Orbit(_) => {
                let sx = 1.0 - (pose.yaw.abs() * 0.55).min(0.28);
                let sy = 1.0 - (pose.pitch.abs() * 0.55).min(0.20);
                LabelFrame {
                    matrix: [sx, 0.0, pose.yaw * 0.55, sy],
                    extrusion: (-pose.yaw * 26.0, pose.pitch * 18.0),
                    lift: 0.0,
                }
            }
            Motion::Shear(_) => {
                let n = layers as f64;
                LabelFrame {
                    matrix: [0.86, 0.0, pose.sway.sin() * 0.30, 1.0],
                    extrusion: (n * 0.55, -n * 0.25),
                    lift: pose.bob * 0.25,
                }
            }
        }
    }
}
