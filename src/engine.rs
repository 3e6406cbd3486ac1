//! Engine lifecycle shared by all three effects.
//!
//! An [`Effect`] is pure simulation state plus a render routine. The
//! [`EffectHost`] owns one effect and its [`Surface`] and enforces the
//! mount/tick/unmount contract:
//!
//! - no frame runs before a surface is mounted or after unmount;
//! - a degenerate (zero-area) surface skips the frame but keeps the loop alive;
//! - resize and input events after unmount are dropped without touching the
//!   surface.
//!
//! The host scheduler calls [`EffectHost::tick`] once per display refresh and
//! stops requesting frames as soon as it returns [`Tick::Stop`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::error::EffectError;
use crate::geom::{Point, Size};
use crate::pointer::Roles;
use crate::surface::Surface;

/// Raw pointer and hover events delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Latest pointer position in surface coordinates.
    PointerMoved(Point),
    /// The pointer entered the tracked viewport.
    PointerEntered,
    /// The pointer left the tracked viewport.
    PointerLeft,
    /// The pointer entered an interactive element carrying `Roles`.
    HoverEntered(Roles),
    /// The pointer left an interactive element.
    HoverLeft,
}

/// What the scheduler should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Request another frame.
    Continue,
    /// Stop requesting frames.
    Stop,
}

/// A per-frame visual effect.
pub trait Effect {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Called once per mount with the surface extent.
    fn mount(&mut self, size: Size);

    /// The surface was resized to `size`.
    fn resize(&mut self, size: Size);

    /// Consume one input event. Only the latest state matters.
    fn input(&mut self, event: InputEvent);

    /// Advance the simulation by one frame.
    fn update(&mut self);

    /// Draw the current state. The surface has already been cleared.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    fn render(&self, surface: &mut dyn Surface) -> Result<(), EffectError>;
}

/// Lifecycle of an [`EffectHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Created, no surface yet.
    #[default]
    Idle,
    /// Mounted against a surface; frames run.
    Running,
    /// Torn down; every further call is a no-op.
    Unmounted,
}

/// Owns one effect and its surface and drives the frame contract.
pub struct EffectHost<E, S> {
    effect: E,
    surface: Option<S>,
    lifecycle: Lifecycle,
    frames: u64,
}

impl<E: Effect, S: Surface> EffectHost<E, S> {
    #[must_use]
    pub fn new(effect: E) -> Self {
        Self { effect, surface: None, lifecycle: Lifecycle::Idle, frames: 0 }
    }

    /// Attach `surface` and start running.
    ///
    /// Mounting twice replaces the surface and re-lays out the effect.
    /// Mounting after unmount is ignored and returns [`Tick::Stop`].
    pub fn mount(&mut self, surface: S) -> Tick {
        if self.lifecycle == Lifecycle::Unmounted {
            return Tick::Stop;
        }
        let size = surface.size();
        self.effect.mount(size);
        self.surface = Some(surface);
        self.lifecycle = Lifecycle::Running;
        tracing::debug!(effect = self.effect.name(), width = size.width, height = size.height, "effect mounted");
        Tick::Continue
    }

    /// Stop the loop and hand the surface back. Idempotent.
    pub fn unmount(&mut self) -> Option<S> {
        if self.lifecycle != Lifecycle::Unmounted {
            tracing::debug!(effect = self.effect.name(), frames = self.frames, "effect unmounted");
        }
        self.lifecycle = Lifecycle::Unmounted;
        self.surface.take()
    }

    /// Resize the surface synchronously. Ignored unless running.
    ///
    /// # Errors
    ///
    /// Propagates a surface that rejects the new size.
    pub fn on_resize(&mut self, size: Size) -> Result<(), EffectError> {
        if self.lifecycle != Lifecycle::Running {
            return Ok(());
        }
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface.resize(size)?;
        self.effect.resize(size);
        tracing::debug!(effect = self.effect.name(), width = size.width, height = size.height, "effect resized");
        Ok(())
    }

    /// Forward an input event. Ignored unless running.
    pub fn on_input(&mut self, event: InputEvent) {
        if self.lifecycle == Lifecycle::Running {
            self.effect.input(event);
        }
    }

    /// Run one frame.
    pub fn tick(&mut self) -> Tick {
        if self.lifecycle != Lifecycle::Running {
            return Tick::Stop;
        }
        let Some(surface) = self.surface.as_mut() else {
            return Tick::Stop;
        };
        if surface.size().is_degenerate() {
            return Tick::Continue;
        }

        self.effect.update();
        if let Err(err) = draw_frame(&self.effect, surface) {
            tracing::warn!(effect = self.effect.name(), error = %err, "frame render failed");
        }
        self.frames += 1;
        Tick::Continue
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Frames rendered since creation.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}

fn draw_frame<E: Effect, S: Surface>(effect: &E, surface: &mut S) -> Result<(), EffectError> {
    surface.clear()?;
    effect.render(surface)
}
