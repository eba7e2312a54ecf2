use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Sampled anywhere inside the silhouette.
    Fill,
    /// Sampled near the silhouette outline.
    Edge,
}

/// A single star in the field. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
    /// Twinkle offset in `[0, 2π)`.
    pub phase: f64,
    /// Twinkle angular speed, radians per second.
    pub speed: f64,
    pub brightness: f64,
    pub kind: Kind,
}

impl Particle {
    /// Raw twinkle in `[0, 1]`, shaped by `power`.
    ///
    /// Periodic in `t` with period `2π / speed`.
    #[inline]
    pub fn twinkle(&self, t: f64, power: f64) -> f64 {
        let base = (t * self.speed + self.phase).sin() * 0.5 + 0.5;
        if power == 1.0 {
            base
        } else {
            base.max(0.0).powf(power)
        }
    }

    pub fn is_edge(&self) -> bool {
        self.kind == Kind::Edge
    }
}

/// Closed interval sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(v: f64) -> Self {
        Self { min: v, max: v }
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.gen::<f64>() * (self.max - self.min)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Visual parameter ranges for one sub-population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleStyle {
    pub radius: Range,
    pub speed: Range,
    pub brightness: Range,
    /// Multiplier on the depth spread; values below 1 bunch particles towards z = 0.
    pub depth_falloff: Range,
}

impl ParticleStyle {
    pub const FILL: ParticleStyle = ParticleStyle {
        radius: Range::new(0.65, 1.75),
        speed: Range::new(0.9, 2.3),
        brightness: Range::new(0.45, 1.0),
        depth_falloff: Range::new(0.55, 1.0),
    };

    pub const EDGE: ParticleStyle = ParticleStyle {
        radius: Range::new(0.85, 2.10),
        speed: Range::new(1.1, 2.6),
        brightness: Range::new(0.70, 1.0),
        depth_falloff: Range::fixed(1.0),
    };

    pub(crate) fn spawn<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        x: f64,
        y: f64,
        depth: f64,
        kind: Kind,
    ) -> Particle {
        let z = (rng.gen::<f64>() * 2.0 - 1.0) * depth * self.depth_falloff.sample(rng);
        Particle {
            x,
            y,
            z,
            radius: self.radius.sample(rng),
            phase: rng.gen::<f64>() * TAU,
            speed: self.speed.sample(rng),
            brightness: self.brightness.sample(rng),
            kind,
        }
    }
}
