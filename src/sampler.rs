//! Rejection-sampling particle builder.
//!
//! Two passes over the same sampling box: a fill pass that keeps any point the
//! silhouette accepts, then an edge pass that additionally requires the point to
//! sit on the outline. Both passes give up after a fixed number of attempts, so a
//! predicate that rejects nearly everything yields a short collection instead of
//! a hang.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::particle::{Kind, Particle, ParticleStyle};
use crate::shape::{near_boundary, Shape};

/// Pulls accepted fill points towards the center by `inner + (1 − inner)·u^exponent`.
///
/// Larger exponents leave more points close to `inner`, which hollows out the rim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialBias {
    pub inner: f64,
    pub exponent: f64,
}

impl RadialBias {
    #[inline]
    fn factor<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inner + (1.0 - self.inner) * rng.gen::<f64>().powf(self.exponent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Population {
    /// Total particles per build.
    pub count: usize,
    /// Share of `count` reserved for the outline.
    pub edge_ratio: f64,
    /// Attempts cap for the fill pass, as a multiple of its target.
    pub fill_attempts: usize,
    /// Attempts cap for the edge pass, as a multiple of its nominal target.
    /// Thin silhouettes need this much higher than the fill multiplier.
    pub edge_attempts: usize,
    /// Nudge used by the boundary test, scaled per axis by
    /// [`Shape::boundary_step`]. For the heart it is measured on the unit curve.
    pub edge_epsilon: f64,
    /// Uniform jitter added to edge positions after acceptance.
    ///
    /// This is the edge tolerance: every edge particle lies within
    /// `edge_jitter` per axis of an anchor that is inside the shape and passes
    /// [`near_boundary`] at `edge_epsilon`. A boundary test on the jittered
    /// position itself can miss, because the box may only graze the outline.
    pub edge_jitter: f64,
    pub bias: Option<RadialBias>,
    pub fill: ParticleStyle,
    pub edge: ParticleStyle,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            count: 12_000,
            edge_ratio: 0.28,
            fill_attempts: 35,
            edge_attempts: 160,
            edge_epsilon: 0.018,
            edge_jitter: 0.010,
            bias: None,
            fill: ParticleStyle::FILL,
            edge: ParticleStyle::EDGE,
        }
    }
}

impl Population {
    pub fn edge_target(&self) -> usize {
        (self.count as f64 * self.edge_ratio).floor() as usize
    }

    pub fn fill_target(&self) -> usize {
        self.count - self.edge_target().min(self.count)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub requested: usize,
    pub fill_built: usize,
    pub edge_built: usize,
    /// Candidates drawn across both passes.
    pub attempts: usize,
}

impl BuildReport {
    pub fn built(&self) -> usize {
        self.fill_built + self.edge_built
    }

    pub fn is_degraded(&self) -> bool {
        self.built() < self.requested
    }
}

#[derive(Debug, Clone)]
pub struct Build {
    pub particles: Vec<Particle>,
    pub report: BuildReport,
}

/// Fills `shape` with up to `population.count` particles spread over `±depth` in z.
pub fn build<S, R>(shape: &S, population: &Population, depth: f64, rng: &mut R) -> Build
where
    S: Shape + ?Sized,
    R: Rng + ?Sized,
{
    let bounds = shape.bounds();
    let mut particles = Vec::with_capacity(population.count);
    let mut report = BuildReport {
        requested: population.count,
        ..BuildReport::default()
    };

    let candidate = |rng: &mut R| {
        (
            rng.gen_range(bounds.min_x..=bounds.max_x),
            rng.gen_range(bounds.min_y..=bounds.max_y),
        )
    };

    let fill_target = population.fill_target();
    let fill_cap = fill_target.saturating_mul(population.fill_attempts);
    let mut tries = 0;
    while particles.len() < fill_target && tries < fill_cap {
        tries += 1;
        let (mut x, mut y) = candidate(rng);
        if !shape.contains(x, y) {
            continue;
        }
        if let Some(bias) = &population.bias {
            let k = bias.factor(rng);
            if shape.contains(x * k, y * k) {
                x *= k;
                y *= k;
            }
        }
        particles.push(population.fill.spawn(rng, x, y, depth, Kind::Fill));
    }
    report.fill_built = particles.len();
    report.attempts += tries;

    // The edge pass tops up whatever the fill pass left short.
    let eps = population.edge_epsilon;
    let jitter = population.edge_jitter;
    let edge_cap = population
        .edge_target()
        .saturating_mul(population.edge_attempts);
    tries = 0;
    while particles.len() < population.count && tries < edge_cap {
        tries += 1;
        let (x, y) = candidate(rng);
        if !shape.contains(x, y) || !near_boundary(shape, x, y, eps) {
            continue;
        }
        let x = x + rng.gen_range(-jitter..=jitter);
        let y = y + rng.gen_range(-jitter..=jitter);
        particles.push(population.edge.spawn(rng, x, y, depth, Kind::Edge));
    }
    report.edge_built = particles.len() - report.fill_built;
    report.attempts += tries;

    if report.is_degraded() {
        log::warn!(
            "particle build stopped short: {}/{} after {} attempts",
            report.built(),
            report.requested,
            report.attempts
        );
    } else {
        log::debug!(
            "built {} particles ({} fill, {} edge)",
            report.built(),
            report.fill_built,
            report.edge_built
        );
    }

    Build { particles, report }
}
