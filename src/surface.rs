//! Drawing surface abstraction.
//!
//! Engines never touch a raster API directly. Each frame they describe what
//! to draw as a sequence of [`DrawCmd`]s against a [`Surface`]; the browser
//! implementation lives in [`crate::render`], and [`RecordingSurface`]
//! captures commands for tests and headless hosts.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Hsla;
use crate::error::EffectError;
use crate::geom::{Point, Size};
use crate::shapes::ShapeKind;

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Disc with optional fill and outline.
    Circle { center: Point, radius: f64, fill: Option<Hsla>, stroke: Option<Stroke> },
    /// Straight segment.
    Line { from: Point, to: Point, stroke: Stroke },
    /// A morph primitive centered at `center`, rotated by `rotation` radians.
    ///
    /// `extent` is the circle radius, the square side, or the triangle span.
    Primitive { kind: ShapeKind, center: Point, rotation: f64, extent: f64, fill: Hsla, stroke: Stroke },
    /// Centered text.
    Label { text: String, at: Point, font_px: f64, color: Hsla },
    /// Disc filled with a linear gradient spanning its diameter, composited
    /// onto what is already drawn with `blend`.
    GradientCircle { center: Point, radius: f64, gradient: LinearGradient, stroke: Option<Stroke>, blend: Blend },
}

/// Two-stop linear gradient.
///
/// `angle` follows CSS `linear-gradient`: radians clockwise from "up", so
/// `3π/4` runs from the top-left to the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub angle: f64,
    pub from: Hsla,
    pub to: Hsla,
}

impl LinearGradient {
    #[must_use]
    pub fn new(angle: f64, from: Hsla, to: Hsla) -> Self {
        Self { angle, from, to }
    }

    /// Start and end points of the gradient line across a disc.
    #[must_use]
    pub fn endpoints(&self, center: Point, radius: f64) -> (Point, Point) {
        let (dx, dy) = (self.angle.sin() * radius, -self.angle.cos() * radius);
        (Point::new(center.x - dx, center.y - dy), Point::new(center.x + dx, center.y + dy))
    }

    /// Both stops with alpha multiplied by `factor`.
    #[must_use]
    pub fn fade(self, factor: f64) -> Self {
        Self { from: self.from.fade(factor), to: self.to.fade(factor), ..self }
    }
}

/// Compositing mode for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    #[default]
    Normal,
    /// Absolute difference of source and backdrop.
    Difference,
}

impl Blend {
    /// Canvas `globalCompositeOperation` keyword.
    #[must_use]
    pub fn composite_operation(self) -> &'static str {
        match self {
            Self::Normal => "source-over",
            Self::Difference => "difference",
        }
    }
}

/// Outline color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Hsla,
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub fn new(color: Hsla, width: f64) -> Self {
        Self { color, width }
    }
}

/// A resizable 2D raster target.
pub trait Surface {
    /// Current extent in CSS pixels.
    fn size(&self) -> Size;

    /// Reallocate the backing store to `size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the new size.
    fn resize(&mut self, size: Size) -> Result<(), EffectError>;

    /// Erase the whole surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing context is unusable.
    fn clear(&mut self) -> Result<(), EffectError>;

    /// Execute one drawing instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing context rejects the call.
    fn draw(&mut self, cmd: &DrawCmd) -> Result<(), EffectError>;
}

/// One mutation observed by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceWrite {
    Resize(Size),
    Clear,
    Draw(DrawCmd),
}

/// Surface that records every write instead of rasterizing.
///
/// Clones share the same log, so a test can keep a handle after moving the
/// surface into an engine host.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    log: Rc<RefCell<Vec<SurfaceWrite>>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self { size, log: Rc::new(RefCell::new(Vec::new())) }
    }

    /// Snapshot of all writes so far.
    #[must_use]
    pub fn writes(&self) -> Vec<SurfaceWrite> {
        self.log.borrow().clone()
    }

    /// Number of writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.log.borrow().len()
    }

    /// Draw commands issued since the most recent clear.
    #[must_use]
    pub fn last_frame(&self) -> Vec<DrawCmd> {
        let log = self.log.borrow();
        let start = log.iter().rposition(|w| matches!(w, SurfaceWrite::Clear)).map_or(0, |i| i + 1);
        log[start..]
            .iter()
            .filter_map(|w| match w {
                SurfaceWrite::Draw(cmd) => Some(cmd.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded writes.
    pub fn reset(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) -> Result<(), EffectError> {
        self.size = size;
        self.log.borrow_mut().push(SurfaceWrite::Resize(size));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), EffectError> {
        self.log.borrow_mut().push(SurfaceWrite::Clear);
        Ok(())
    }

    fn draw(&mut self, cmd: &DrawCmd) -> Result<(), EffectError> {
        self.log.borrow_mut().push(SurfaceWrite::Draw(cmd.clone()));
        Ok(())
    }
}
