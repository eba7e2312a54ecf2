#![cfg(not(target_arch = "wasm32"))]

use heart_field::particle::Range;
use heart_field::sampler::{build, Population, RadialBias};
use heart_field::shape::{near_boundary, Bounds, Predicate};
use heart_field::{Circle, Heart, Kind, Shape};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn population(count: usize, edge_ratio: f64) -> Population {
    Population {
        count,
        edge_ratio,
        ..Population::default()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    sum / n as f64
}

#[test]
fn unit_circle_all_fill_is_centered() {
    let mut rng = StdRng::seed_from_u64(7);
    let out = build(&Circle::UNIT, &population(1000, 0.0), 0.0, &mut rng);

    assert_eq!(out.particles.len(), 1000);
    assert!(out
        .particles
        .iter()
        .all(|p| p.x * p.x + p.y * p.y <= 1.0 && p.kind == Kind::Fill));

    let mx = mean(out.particles.iter().map(|p| p.x));
    let my = mean(out.particles.iter().map(|p| p.y));
    assert!(mx.abs() < 0.05, "mean x = {mx}");
    assert!(my.abs() < 0.05, "mean y = {my}");
}

#[test]
fn heart_build_hits_target_split() {
    let mut rng = StdRng::seed_from_u64(11);
    let pop = population(4000, 0.28);
    let out = build(&Heart::default(), &pop, 0.35, &mut rng);

    assert_eq!(out.particles.len(), 4000);
    assert_eq!(out.report.fill_built, pop.fill_target());
    assert_eq!(out.report.edge_built, pop.edge_target());
    assert_eq!(pop.edge_target(), 1120);
    assert!(!out.report.is_degraded());

    let edges = out.particles.iter().filter(|p| p.is_edge()).count();
    assert_eq!(edges, 1120);
    // fill comes first, edge after
    assert!(out.particles[..pop.fill_target()]
        .iter()
        .all(|p| p.kind == Kind::Fill));
}

#[test]
fn rejecting_everything_terminates_short() {
    let never = Predicate::new(Bounds::square(1.0), |_x: f64, _y: f64| false);
    let pop = population(500, 0.25);
    let mut rng = StdRng::seed_from_u64(3);
    let out = build(&never, &pop, 0.35, &mut rng);

    assert!(out.particles.is_empty());
    assert!(out.report.is_degraded());
    assert_eq!(
        out.report.attempts,
        pop.fill_target() * pop.fill_attempts + pop.edge_target() * pop.edge_attempts
    );
}

#[test]
fn thin_shape_degrades_without_error() {
    // a sliver covering ~0.05% of the box
    let sliver = Predicate::new(Bounds::square(1.0), |x: f64, _y: f64| x.abs() < 0.0005);
    let pop = Population {
        fill_attempts: 20,
        ..population(300, 0.0)
    };
    let mut rng = StdRng::seed_from_u64(5);
    let out = build(&sliver, &pop, 0.0, &mut rng);

    assert!(out.particles.len() < 300);
    assert!(out.particles.iter().all(|p| sliver.contains(p.x, p.y)));
}

#[test]
fn short_fill_is_topped_up_by_edge_pass() {
    let pop = Population {
        fill_attempts: 1,
        ..population(1000, 0.3)
    };
    let mut rng = StdRng::seed_from_u64(9);
    let out = build(&Circle::UNIT, &pop, 0.0, &mut rng);

    // one attempt per fill slot lands inside the unit circle ~78% of the time
    assert!(out.report.fill_built < pop.fill_target());
    assert_eq!(out.particles.len(), 1000);
    assert!(out.report.edge_built > pop.edge_target());
}

#[test]
fn radial_bias_pulls_points_inward() {
    let plain = population(3000, 0.0);
    let biased = Population {
        bias: Some(RadialBias {
            inner: 0.5,
            exponent: 2.0,
        }),
        ..plain.clone()
    };
    let radius = |pop: &Population, seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = build(&Circle::UNIT, pop, 0.0, &mut rng);
        mean(out.particles.iter().map(|p| p.x.hypot(p.y)))
    };
    // uniform disk mean radius is 2/3; biased mean is about 2/3 · 2/3
    let r_plain = radius(&plain, 21);
    let r_biased = radius(&biased, 21);
    assert!(r_biased < r_plain - 0.15, "{r_biased} vs {r_plain}");
}

#[test]
fn particle_parameters_stay_in_style_ranges() {
    let pop = population(2000, 0.3);
    let mut rng = StdRng::seed_from_u64(17);
    let depth = 0.35;
    let out = build(&Heart::default(), &pop, depth, &mut rng);

    let phase = Range::new(0.0, std::f64::consts::TAU);
    for p in &out.particles {
        let style = if p.is_edge() { &pop.edge } else { &pop.fill };
        assert!(style.radius.contains(p.radius));
        assert!(style.speed.contains(p.speed));
        assert!(style.brightness.contains(p.brightness));
        assert!(p.brightness > 0.0 && p.brightness <= 1.0);
        assert!(phase.contains(p.phase) && p.phase < std::f64::consts::TAU);
        assert!(p.z.abs() <= depth);
    }
}

#[test]
fn rebuilds_match_in_distribution() {
    let pop = population(4000, 0.28);
    let heart = Heart::default();
    let a = build(&heart, &pop, 0.35, &mut StdRng::seed_from_u64(100)).particles;
    let b = build(&heart, &pop, 0.35, &mut StdRng::seed_from_u64(200)).particles;

    assert_eq!(a.len(), b.len());
    assert_ne!(a, b);
    let (ax, bx) = (mean(a.iter().map(|p| p.x)), mean(b.iter().map(|p| p.x)));
    let (ay, by) = (mean(a.iter().map(|p| p.y)), mean(b.iter().map(|p| p.y)));
    assert!(ax.abs() < 0.05 && bx.abs() < 0.05, "{ax} {bx}");
    assert!((ay - by).abs() < 0.05, "{ay} {by}");
}

#[test]
fn heart_edge_particles_stay_within_jitter_of_the_outline() {
    let heart = Heart::default();
    let jittered = population(1500, 1.0);
    let anchored = Population {
        edge_jitter: 0.0,
        ..jittered.clone()
    };
    // a zero-width jitter still draws, so both builds consume the same stream
    let a = build(&heart, &anchored, 0.35, &mut StdRng::seed_from_u64(23)).particles;
    let b = build(&heart, &jittered, 0.35, &mut StdRng::seed_from_u64(23)).particles;

    assert_eq!(a.len(), 1500);
    assert_eq!(b.len(), 1500);
    let tol = jittered.edge_jitter + 1e-12;
    for (anchor, p) in a.iter().zip(&b) {
        assert_eq!(p.kind, Kind::Edge);
        assert!(heart.contains(anchor.x, anchor.y), "{anchor:?}");
        assert!(
            near_boundary(&heart, anchor.x, anchor.y, jittered.edge_epsilon),
            "{anchor:?}"
        );
        assert!((p.x - anchor.x).abs() <= tol, "{p:?} vs {anchor:?}");
        assert!((p.y - anchor.y).abs() <= tol, "{p:?} vs {anchor:?}");
        assert_eq!(p.z, anchor.z);
        assert_eq!(p.radius, anchor.radius);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn fill_particles_satisfy_the_heart(count in 500usize..1500, seed in any::<u64>()) {
        let heart = Heart::default();
        let pop = population(count, 0.28);
        let out = build(&heart, &pop, 0.35, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(out.particles.len(), count);
        for p in out.particles.iter().filter(|p| p.kind == Kind::Fill) {
            prop_assert!(heart.contains(p.x, p.y));
        }
    }

    #[test]
    fn edge_particles_hug_the_circle(count in 500usize..1500, seed in any::<u64>()) {
        let pop = population(count, 1.0);
        let out = build(&Circle::UNIT, &pop, 0.0, &mut StdRng::seed_from_u64(seed));
        // accepted points are inside with an outside neighbour at eps, then
        // jittered by at most `edge_jitter` per axis
        let band = pop.edge_epsilon + pop.edge_jitter * 2f64.sqrt() + 1e-12;

        prop_assert_eq!(out.particles.len(), count);
        for p in &out.particles {
            prop_assert_eq!(p.kind, Kind::Edge);
            let r = p.x.hypot(p.y);
            prop_assert!((r - 1.0).abs() <= band, "r = {}", r);
        }
    }

    #[test]
    fn unjittered_heart_edges_pass_the_boundary_test(count in 300usize..900, seed in any::<u64>()) {
        let heart = Heart::default();
        let pop = Population {
            edge_jitter: 0.0,
            ..population(count, 0.5)
        };
        let out = build(&heart, &pop, 0.35, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(out.particles.len(), count);
        for p in out.particles.iter().filter(|p| p.is_edge()) {
            prop_assert!(heart.contains(p.x, p.y));
            prop_assert!(near_boundary(&heart, p.x, p.y, pop.edge_epsilon));
        }
    }
}
