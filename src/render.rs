//! Rendering: executes [`DrawCmd`]s against a 2D canvas context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Engines describe a frame as draw commands; [`CanvasSurface`] turns each one
//! into path and style calls and never holds engine state.
//!
//! Fallible `Canvas2D` calls return `Result<(), JsValue>` internally and are
//! converted to [`EffectError`] at the [`Surface`] boundary.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Hsla;
use crate::error::EffectError;
use crate::geom::{Point, Size};
use crate::shapes::ShapeKind;
use crate::surface::{Blend, DrawCmd, LinearGradient, Stroke, Surface};

/// A [`Surface`] backed by an `HtmlCanvasElement`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the canvas's 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::SurfaceUnavailable`] if the canvas has no 2D
    /// context (already claimed by another API, or unsupported).
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, EffectError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(EffectError::SurfaceUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EffectError::SurfaceUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn resize(&mut self, size: Size) -> Result<(), EffectError> {
        self.canvas.set_width(pixels(size.width));
        self.canvas.set_height(pixels(size.height));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), EffectError> {
        let size = self.size();
        self.ctx.set_global_alpha(1.0);
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn draw(&mut self, cmd: &DrawCmd) -> Result<(), EffectError> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Circle { center, radius, fill, stroke } => draw_circle(ctx, *center, *radius, *fill, *stroke)?,
            DrawCmd::Line { from, to, stroke } => draw_line(ctx, *from, *to, *stroke),
            DrawCmd::Primitive { kind, center, rotation, extent, fill, stroke } => {
                draw_primitive(ctx, *kind, *center, *rotation, *extent, *fill, *stroke)?;
            }
            DrawCmd::Label { text, at, font_px, color } => draw_label(ctx, text, *at, *font_px, *color)?,
            DrawCmd::GradientCircle { center, radius, gradient, stroke, blend } => {
                draw_gradient_circle(ctx, *center, *radius, gradient, *stroke, *blend)?;
            }
        }
        Ok(())
    }
}

/// Canvas backing-store dimensions are whole pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(css: f64) -> u32 {
    css.max(0.0).round() as u32
}

// =============================================================
// Command renderers
// =============================================================

fn draw_circle(
    ctx: &CanvasRenderingContext2d,
    center: Point,
    radius: f64,
    fill: Option<Hsla>,
    stroke: Option<Stroke>,
) -> Result<(), JsValue> {
    if radius <= 0.0 {
        return Ok(());
    }
    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
    if let Some(fill) = fill {
        ctx.set_fill_style_str(&fill.to_css());
        ctx.fill();
    }
    if let Some(stroke) = stroke {
        apply_stroke(ctx, stroke);
        ctx.stroke();
    }
    Ok(())
}

fn draw_gradient_circle(
    ctx: &CanvasRenderingContext2d,
    center: Point,
    radius: f64,
    gradient: &LinearGradient,
    stroke: Option<Stroke>,
    blend: Blend,
) -> Result<(), JsValue> {
    if radius <= 0.0 {
        return Ok(());
    }
    let (start, end) = gradient.endpoints(center, radius);
    let paint = ctx.create_linear_gradient(start.x, start.y, end.x, end.y);
    paint.add_color_stop(0.0, &gradient.from.to_css())?;
    paint.add_color_stop(1.0, &gradient.to.to_css())?;

    ctx.save();
    ctx.set_global_composite_operation(blend.composite_operation())?;
    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
    ctx.set_fill_style_canvas_gradient(&paint);
    ctx.fill();
    if let Some(stroke) = stroke {
        apply_stroke(ctx, stroke);
        ctx.stroke();
    }
    ctx.restore();
    Ok(())
}

fn draw_line(ctx: &CanvasRenderingContext2d, from: Point, to: Point, stroke: Stroke) {
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    apply_stroke(ctx, stroke);
    ctx.stroke();
}

fn draw_primitive(
    ctx: &CanvasRenderingContext2d,
    kind: ShapeKind,
    center: Point,
    rotation: f64,
    extent: f64,
    fill: Hsla,
    stroke: Stroke,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(center.x, center.y)?;
    ctx.rotate(rotation)?;

    let half = extent / 2.0;
    ctx.begin_path();
    match kind {
        ShapeKind::Circle => ctx.arc(0.0, 0.0, extent.max(0.0), 0.0, TAU)?,
        ShapeKind::Square => ctx.rect(-half, -half, extent, extent),
        ShapeKind::Triangle => {
            ctx.move_to(0.0, -half);
            ctx.line_to(-half, half);
            ctx.line_to(half, half);
            ctx.close_path();
        }
    }
    ctx.set_fill_style_str(&fill.to_css());
    ctx.fill();
    apply_stroke(ctx, stroke);
    ctx.stroke();

    ctx.restore();
    Ok(())
}

fn draw_label(
    ctx: &CanvasRenderingContext2d,
    text: &str,
    at: Point,
    font_px: f64,
    color: Hsla,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_font(&format!("bold {font_px}px sans-serif"));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(&color.to_css());
    ctx.fill_text(text, at.x, at.y)?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: Stroke) {
    ctx.set_stroke_style_str(&stroke.color.to_css());
    ctx.set_line_width(stroke.width);
}
