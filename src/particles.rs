//! Particle field: free-floating points with edge reflection, pointer
//! repulsion, and proximity lines.
//!
//! The field is an engine-owned arena. Particles are seeded as a whole on
//! mount (and on resize when configured) and mutated in place every frame.

#[cfg(test)]
#[path = "particles_test.rs"]
mod particles_test;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::color::Hsla;
use crate::config::{FieldConfig, RepulsionMode};
use crate::consts::FRAME_TIME_MS;
use crate::engine::{Effect, InputEvent};
use crate::fade::FadeIn;
use crate::error::EffectError;
use crate::geom::{Point, Size};
use crate::spatial::{self, Neighbor};
use crate::surface::{DrawCmd, Stroke, Surface};

/// One simulated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Point,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
    /// Base color, opaque. Rendering applies `opacity`.
    pub color: Hsla,
}

impl Particle {
    /// Euler step followed by reflection against `bounds`.
    ///
    /// A component is inverted only while it still points outward, so a
    /// particle left outside by a shrinking resize drifts back instead of
    /// flipping every frame.
    pub fn advance(&mut self, bounds: Size) {
        self.pos.x += self.vx;
        self.pos.y += self.vy;
        if (self.pos.x < 0.0 && self.vx < 0.0) || (self.pos.x > bounds.width && self.vx > 0.0) {
            self.vx = -self.vx;
        }
        if (self.pos.y < 0.0 && self.vy < 0.0) || (self.pos.y > bounds.height && self.vy > 0.0) {
            self.vy = -self.vy;
        }
    }

    /// Push away from `pointer` when inside `radius`.
    pub fn repel(&mut self, pointer: Point, radius: f64, strength: f64, mode: RepulsionMode) {
        let away = self.pos.offset_from(pointer);
        let distance = away.x.hypot(away.y);
        if distance >= radius {
            return;
        }
        let force = (radius - distance) / radius * strength;
        self.vx += away.x * force;
        match mode {
            RepulsionMode::Symmetric => self.vy += away.y * force,
            RepulsionMode::Legacy => self.pos.y += away.y * force,
        }
    }
}

/// A connecting line between two particles, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub alpha: f64,
}

/// The particle field engine.
pub struct ParticleField {
    config: FieldConfig,
    rng: SmallRng,
    bounds: Size,
    pointer: Option<Point>,
    particles: Vec<Particle>,
    fade: FadeIn,
}

impl ParticleField {
    /// Create an unseeded field. `seed` drives every random draw.
    #[must_use]
    pub fn new(config: FieldConfig, seed: u64) -> Self {
        let seed = config.seed.unwrap_or(seed);
        Self {
            fade: FadeIn::new(config.fade_delay_ms, config.fade_in_ms),
            config,
            rng: SmallRng::seed_from_u64(seed),
            bounds: Size::default(),
            pointer: None,
            particles: Vec::new(),
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Direct access for hosts and tests that place particles by hand.
    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Mount fade-in level applied to every alpha.
    #[must_use]
    pub fn fade_level(&self) -> f64 {
        self.fade.level()
    }

    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Replace every particle with a fresh random one inside the bounds.
    ///
    /// Clears the field on a degenerate surface.
    pub fn reseed(&mut self) {
        if self.bounds.is_degenerate() {
            self.particles.clear();
            return;
        }
        let count = self.config.particle_count;
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(self.spawn());
        }
        self.particles = particles;
        tracing::debug!(count, width = self.bounds.width, height = self.bounds.height, "particle field seeded");
    }

    fn spawn(&mut self) -> Particle {
        let c = &self.config;
        let (speed, bounds) = (c.speed, self.bounds);
        let (r0, r1, o0, o1, h0, h1) = (c.radius_min, c.radius_max, c.opacity_min, c.opacity_max, c.hue_min, c.hue_max);
        let (saturation, lightness) = (c.saturation, c.lightness);
        let rng = &mut self.rng;
        Particle {
            pos: Point::new(uniform(rng, 0.0, bounds.width), uniform(rng, 0.0, bounds.height)),
            vx: uniform(rng, -speed, speed),
            vy: uniform(rng, -speed, speed),
            radius: uniform(rng, r0, r1),
            opacity: uniform(rng, o0, o1),
            color: Hsla::new(uniform(rng, h0, h1), saturation, lightness, 1.0),
        }
    }

    /// Integrate, reflect and repel every particle once.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        let (radius, strength, mode) =
            (self.config.repulsion_radius, self.config.repulsion_strength, self.config.repulsion_mode);
        for p in &mut self.particles {
            p.advance(bounds);
            if let Some(pointer) = self.pointer {
                p.repel(pointer, radius, strength, mode);
            }
        }
    }

    /// Pairs closer than the link distance, ascending by `(a, b)`.
    #[must_use]
    pub fn neighbors(&self) -> Vec<Neighbor> {
        let points = self.particles.iter().map(|p| p.pos).collect::<Vec<_>>();
        spatial::neighbors_within(&points, self.config.link_distance)
    }

    /// Connecting lines with their dimmed alpha.
    #[must_use]
    pub fn links(&self) -> Vec<Link> {
        let threshold = self.config.link_distance;
        let dimming = self.config.link_dimming;
        self.neighbors()
            .into_iter()
            .map(|n| Link { a: n.a, b: n.b, alpha: link_alpha(n.distance, threshold, dimming) })
            .collect()
    }
}

/// Line alpha: 1 at distance zero, 0 at `threshold`, scaled by `dimming`.
#[must_use]
pub fn link_alpha(distance: f64, threshold: f64, dimming: f64) -> f64 {
    ((threshold - distance) / threshold).clamp(0.0, 1.0) * dimming
}

/// Uniform draw from `[lo, hi)`; returns `lo` for an empty range.
fn uniform(rng: &mut SmallRng, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.random::<f64>()
}

impl Effect for ParticleField {
    fn name(&self) -> &'static str {
        "particle_field"
    }

    fn mount(&mut self, size: Size) {
        self.bounds = size;
        self.pointer = None;
        self.fade.reset();
        self.reseed();
    }

    fn resize(&mut self, size: Size) {
        self.bounds = size;
        if self.config.reseed_on_resize || self.particles.is_empty() {
            self.reseed();
        }
    }

    fn input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved(p) => self.pointer = Some(p),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::PointerEntered | InputEvent::HoverEntered(_) | InputEvent::HoverLeft => {}
        }
    }

    fn update(&mut self) {
        self.step();
        self.fade.advance(FRAME_TIME_MS);
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<(), EffectError> {
        let fade = self.fade.level();
        for p in &self.particles {
            surface.draw(&DrawCmd::Circle {
                center: p.pos,
                radius: p.radius,
                fill: Some(p.color.with_alpha(p.opacity * fade)),
                stroke: None,
            })?;
        }
        for link in self.links() {
            let (a, b) = (&self.particles[link.a], &self.particles[link.b]);
            surface.draw(&DrawCmd::Line {
                from: a.pos,
                to: b.pos,
                stroke: Stroke::new(a.color.with_alpha(link.alpha * fade), self.config.link_width),
            })?;
        }
        Ok(())
    }
}
