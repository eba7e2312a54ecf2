//! Silhouette predicates.
//!
//! A shape is an implicit planar region: a cheap closed-form membership test plus
//! an axis-aligned box that encloses it. The sampler draws candidates from the box
//! and keeps the ones the predicate accepts, so `contains` sits on the hot path
//! and is called many times per accepted particle.

use serde::{Deserialize, Serialize};

/// Axis-aligned sampling box in normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub const fn square(half: f64) -> Self {
        Self::new(-half, half, -half, half)
    }
}

pub trait Shape {
    fn contains(&self, x: f64, y: f64) -> bool;
    fn bounds(&self) -> Bounds;

    /// Per-axis nudge the boundary test uses for `eps`. Shapes defined on a
    /// stretched unit curve scale it so `eps` is measured on the unit curve.
    fn boundary_step(&self, eps: f64) -> (f64, f64) {
        (eps, eps)
    }
}

impl<S: Shape + ?Sized> Shape for &S {
    fn contains(&self, x: f64, y: f64) -> bool {
        (**self).contains(x, y)
    }

    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn boundary_step(&self, eps: f64) -> (f64, f64) {
        (**self).boundary_step(eps)
    }
}

/// Implicit heart `(u²+v²−1)³ − u²v³ ≤ 0`, stretched by `x_scale`/`y_scale`.
///
/// Lobes point towards +y, so screen mapping must flip the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heart {
    pub x_scale: f64,
    pub y_scale: f64,
}

impl Default for Heart {
    fn default() -> Self {
        Self {
            x_scale: 1.08,
            y_scale: 0.96,
        }
    }
}

impl Shape for Heart {
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        let u = x / self.x_scale;
        let v = y / self.y_scale;
        let a = u * u + v * v - 1.0;
        a * a * a - u * u * v * v * v <= 0.0
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(-1.35, 1.35, -1.25, 1.25)
    }

    fn boundary_step(&self, eps: f64) -> (f64, f64) {
        (eps * self.x_scale, eps * self.y_scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub const UNIT: Circle = Circle { radius: 1.0 };
}

impl Shape for Circle {
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        x * x + y * y <= self.radius * self.radius
    }

    fn bounds(&self) -> Bounds {
        Bounds::square(self.radius)
    }
}

/// Ad-hoc silhouette from a closure.
pub struct Predicate<F> {
    test: F,
    bounds: Bounds,
}

impl<F: Fn(f64, f64) -> bool> Predicate<F> {
    pub fn new(bounds: Bounds, test: F) -> Self {
        Self { test, bounds }
    }
}

impl<F: Fn(f64, f64) -> bool> Shape for Predicate<F> {
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        (self.test)(x, y)
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Finite-difference boundary test: true when nudging the point along any of
/// the four axis directions changes the predicate's answer. The nudge is
/// [`Shape::boundary_step`] of `eps`, so for a [`Heart`] it is `eps` in unit-heart
/// space (`eps·x_scale` along x and `eps·y_scale` along y here).
///
/// This is an approximation of "close to the zero level set", not a distance.
/// Edge crispness is tuned around it, so keep it this way.
pub fn near_boundary<S: Shape + ?Sized>(shape: &S, x: f64, y: f64, eps: f64) -> bool {
    let here = shape.contains(x, y);
    let (sx, sy) = shape.boundary_step(eps);
    [(sx, 0.0), (-sx, 0.0), (0.0, sy), (0.0, -sy)]
        .iter()
        .any(|&(dx, dy)| shape.contains(x + dx, y + dy) != here)
}

/// Silhouette selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Silhouette {
    Heart(Heart),
    Circle(Circle),
}

impl Default for Silhouette {
    fn default() -> Self {
        Silhouette::Heart(Heart::default())
    }
}

impl Shape for Silhouette {
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Silhouette::Heart(h) => h.contains(x, y),
            Silhouette::Circle(c) => c.contains(x, y),
        }
    }

    fn bounds(&self) -> Bounds {
        match self {
            Silhouette::Heart(h) => h.bounds(),
            Silhouette::Circle(c) => c.bounds(),
        }
    }

    fn boundary_step(&self, eps: f64) -> (f64, f64) {
        match self {
            Silhouette::Heart(h) => h.boundary_step(eps),
            Silhouette::Circle(c) => c.boundary_step(eps),
        }
    }
}
