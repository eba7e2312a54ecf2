use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::error::Result;
use crate::particle::Particle;
use crate::render::{render_frame, Surface, Viewport};
use crate::sampler::{self, BuildReport};
use crate::sprite::Sprite;

/// One independent animated field: its config, particles, clock and viewport.
///
/// The particle set is shared as `Rc<[Particle]>` and never mutated. A rebuild
/// swaps in a fresh allocation, so holders of the old set keep a stable
/// snapshot.
pub struct Scene {
    config: Config,
    particles: Rc<[Particle]>,
    report: BuildReport,
    generation: u64,
    viewport: Viewport,
    pending: Option<Viewport>,
    start_ms: Option<f64>,
    rng: StdRng,
    scratch: Vec<Sprite>,
}

impl Scene {
    pub fn new(config: Config, viewport: Viewport) -> Result<Self> {
        Self::with_rng(config, viewport, StdRng::from_entropy())
    }

    /// Deterministic scene, for tests and reproducible captures.
    pub fn with_seed(config: Config, viewport: Viewport, seed: u64) -> Result<Self> {
        Self::with_rng(config, viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, viewport: Viewport, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let mut scene = Self {
            config,
            particles: Rc::from(Vec::new()),
            report: BuildReport::default(),
            generation: 0,
            viewport,
            pending: None,
            start_ms: None,
            rng,
            scratch: Vec::new(),
        };
        scene.rebuild();
        Ok(scene)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn particles(&self) -> &Rc<[Particle]> {
        &self.particles
    }

    pub fn report(&self) -> BuildReport {
        self.report
    }

    /// Number of builds so far; the first build is generation 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records a new viewport. The rebuild is deferred to the next frame, so a
    /// burst of resize events costs at most one rebuild per frame.
    pub fn resize(&mut self, viewport: Viewport) {
        self.pending = Some(viewport);
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies a pending resize, if any. Returns whether a rebuild happened.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(viewport) => {
                self.viewport = viewport;
                self.rebuild();
                true
            }
            None => false,
        }
    }

    /// Discards the particle set and samples a new one.
    pub fn rebuild(&mut self) {
        let build = sampler::build(
            &self.config.silhouette,
            &self.config.population,
            self.config.depth,
            &mut self.rng,
        );
        self.particles = Rc::from(build.particles);
        self.report = build.report;
        self.generation += 1;
        log::debug!(
            "scene generation {}: {} particles for {}x{}",
            self.generation,
            self.particles.len(),
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Seconds since the first frame. The clock starts on the first call.
    pub fn elapsed(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        ((now_ms - start) / 1000.0).max(0.0)
    }

    /// Applies any pending resize, then paints the frame for `now_ms`.
    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> Result<usize> {
        self.flush();
        let t = self.elapsed(now_ms);
        render_frame(
            &self.particles,
            &self.config,
            &self.viewport,
            t,
            surface,
            &mut self.scratch,
        )
    }
}
