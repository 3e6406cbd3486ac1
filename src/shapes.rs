//! Morphing shapes: a fixed trio of primitives that drift, rotate, and swap
//! between their own kind and a cycling target kind.

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use serde::{Deserialize, Serialize};

use crate::color::Hsla;
use crate::config::MorphConfig;
use crate::consts::MORPH_PERIOD;
use crate::engine::{Effect, InputEvent};
use crate::fade::FadeIn;
use crate::error::EffectError;
use crate::geom::{Point, Size};
use crate::surface::{DrawCmd, Stroke, Surface};

/// Primitive drawn for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    /// Next kind in the cycle circle → square → triangle → circle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Circle => Self::Square,
            Self::Square => Self::Triangle,
            Self::Triangle => Self::Circle,
        }
    }

    /// Base hue of this primitive's color band.
    #[must_use]
    pub fn base_hue(self) -> f64 {
        match self {
            Self::Circle => 200.0,
            Self::Square => 280.0,
            Self::Triangle => 120.0,
        }
    }
}

/// One drifting primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub target: ShapeKind,
    pub pos: Point,
    pub size: f64,
    pub rotation: f64,
    /// Morph phase in `[0, 2π)`.
    pub phase: f64,
}

impl Shape {
    /// `sin(phase) * 0.5 + 0.5`, in `[0, 1]`.
    #[must_use]
    pub fn morph_factor(&self) -> f64 {
        self.phase.sin().mul_add(0.5, 0.5)
    }

    /// The kind drawn this frame: target past the midpoint, own kind otherwise.
    #[must_use]
    pub fn rendered_kind(&self) -> ShapeKind {
        if self.morph_factor() > 0.5 { self.target } else { self.kind }
    }

    /// Advance the morph phase; on wrap reset to zero and step the target.
    ///
    /// Returns `true` when the phase wrapped.
    pub fn advance_phase(&mut self, step: f64) -> bool {
        self.phase += step;
        if self.phase >= MORPH_PERIOD {
            self.phase = 0.0;
            self.target = self.target.next();
            return true;
        }
        false
    }
}

/// Starting layout: kind, fractional position, size, first target.
const INITIAL_SHAPES: [(ShapeKind, f64, f64, f64, ShapeKind); 3] = [
    (ShapeKind::Circle, 0.2, 0.3, 80.0, ShapeKind::Triangle),
    (ShapeKind::Square, 0.8, 0.7, 100.0, ShapeKind::Circle),
    (ShapeKind::Triangle, 0.5, 0.8, 90.0, ShapeKind::Square),
];

/// Wrap `value` into `[0, extent]`, jumping to the opposite edge.
fn wrap(value: f64, extent: f64) -> f64 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// The shape morphing engine.
pub struct ShapeMorpher {
    config: MorphConfig,
    bounds: Size,
    /// Drift clock, advanced a nominal frame time per update.
    elapsed_ms: f64,
    shapes: Vec<Shape>,
    fade: FadeIn,
}

impl ShapeMorpher {
    #[must_use]
    pub fn new(config: MorphConfig) -> Self {
        let fade = FadeIn::new(config.fade_delay_ms, config.fade_in_ms);
        Self { config, bounds: Size::default(), elapsed_ms: 0.0, shapes: Vec::new(), fade }
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Mount fade-in level applied to fill and stroke alpha.
    #[must_use]
    pub fn fade_level(&self) -> f64 {
        self.fade.level()
    }

    /// Lay out the starting trio relative to `bounds`.
    fn populate(&mut self) {
        let bounds = self.bounds;
        self.shapes = INITIAL_SHAPES
            .iter()
            .map(|&(kind, fx, fy, size, target)| Shape {
                kind,
                target,
                pos: bounds.at_fraction(fx, fy),
                size,
                rotation: 0.0,
                phase: 0.0,
            })
            .collect();
    }

    /// Advance every shape by one frame.
    pub fn step(&mut self) {
        let c = &self.config;
        let bounds = self.bounds;
        let clock = self.elapsed_ms * c.drift_rate;
        for (i, shape) in self.shapes.iter_mut().enumerate() {
            if shape.advance_phase(c.phase_step) {
                tracing::trace!(shape = i, target = ?shape.target, "morph target advanced");
            }
            shape.rotation += c.rotation_step;

            let lane = clock + index_phase(i);
            shape.pos.y += lane.sin() * c.drift_y;
            shape.pos.x += lane.cos() * c.drift_x;
            shape.pos.x = wrap(shape.pos.x, bounds.width);
            shape.pos.y = wrap(shape.pos.y, bounds.height);
        }
        self.elapsed_ms += c.frame_time_ms;
    }

    fn draw_command(&self, shape: &Shape) -> DrawCmd {
        let c = &self.config;
        let factor = shape.morph_factor();
        let kind = shape.rendered_kind();
        let fade = self.fade.level();
        let color = Hsla::new(kind.base_hue(), 70.0, 60.0, 1.0).shift_hue(factor * c.hue_shift);
        DrawCmd::Primitive {
            kind,
            center: shape.pos,
            rotation: shape.rotation,
            extent: shape.size * factor.mul_add(c.scale_range, c.scale_base),
            fill: color.with_alpha(c.fill_alpha * fade),
            stroke: Stroke::new(color.with_alpha(c.stroke_alpha * fade), c.line_width),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn index_phase(i: usize) -> f64 {
    i as f64
}

impl Effect for ShapeMorpher {
    fn name(&self) -> &'static str {
        "shape_morpher"
    }

    fn mount(&mut self, size: Size) {
        self.bounds = size;
        self.elapsed_ms = 0.0;
        self.fade.reset();
        self.populate();
    }

    fn resize(&mut self, size: Size) {
        let was_degenerate = self.bounds.is_degenerate();
        self.bounds = size;
        if was_degenerate && !size.is_degenerate() {
            self.populate();
        }
    }

    fn input(&mut self, _event: InputEvent) {}

    fn update(&mut self) {
        self.step();
        self.fade.advance(self.config.frame_time_ms);
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<(), EffectError> {
        for shape in &self.shapes {
            surface.draw(&self.draw_command(shape))?;
        }
        Ok(())
    }
}
