#![allow(clippy::float_cmp)]

use super::*;
use crate::color::Hsla;
use crate::config::{FieldConfig, MorphConfig, PointerConfig};
use crate::particles::ParticleField;
use crate::pointer::PointerIndicator;
use crate::shapes::ShapeMorpher;
use crate::surface::{DrawCmd, RecordingSurface, SurfaceWrite};

// =============================================================
// Helpers
// =============================================================

/// Effect that counts calls and draws one disc per frame.
#[derive(Default)]
struct Counter {
    mounts: usize,
    resizes: Vec<Size>,
    inputs: Vec<InputEvent>,
    updates: usize,
}

impl Effect for Counter {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn mount(&mut self, _size: Size) {
        self.mounts += 1;
    }

    fn resize(&mut self, size: Size) {
        self.resizes.push(size);
    }

    fn input(&mut self, event: InputEvent) {
        self.inputs.push(event);
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<(), EffectError> {
        surface.draw(&DrawCmd::Circle { center: Point::default(), radius: 1.0, fill: Some(Hsla::white()), stroke: None })
    }
}

/// Surface whose draw calls always fail.
struct Broken(Size);

impl Surface for Broken {
    fn size(&self) -> Size {
        self.0
    }

    fn resize(&mut self, size: Size) -> Result<(), EffectError> {
        self.0 = size;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), EffectError> {
        Ok(())
    }

    fn draw(&mut self, _cmd: &DrawCmd) -> Result<(), EffectError> {
        Err(EffectError::SurfaceUnavailable)
    }
}

fn viewport() -> Size {
    Size::new(800.0, 600.0)
}

fn mounted_counter() -> (EffectHost<Counter, RecordingSurface>, RecordingSurface) {
    let surface = RecordingSurface::new(viewport());
    let spy = surface.clone();
    let mut host = EffectHost::new(Counter::default());
    assert_eq!(host.mount(surface), Tick::Continue);
    (host, spy)
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn new_host_is_idle_and_does_not_tick() {
    let mut host: EffectHost<Counter, RecordingSurface> = EffectHost::new(Counter::default());
    assert_eq!(host.lifecycle(), Lifecycle::Idle);
    assert_eq!(host.tick(), Tick::Stop);
    assert_eq!(host.effect().updates, 0);
}

#[test]
fn idle_host_ignores_resize_and_input() {
    let mut host: EffectHost<Counter, RecordingSurface> = EffectHost::new(Counter::default());
    assert!(host.on_resize(viewport()).is_ok());
    host.on_input(InputEvent::PointerEntered);
    assert!(host.effect().resizes.is_empty());
    assert!(host.effect().inputs.is_empty());
}

#[test]
fn mount_starts_running_and_lays_out_once() {
    let (host, spy) = mounted_counter();
    assert_eq!(host.lifecycle(), Lifecycle::Running);
    assert_eq!(host.effect().mounts, 1);
    assert_eq!(spy.write_count(), 0);
}

#[test]
fn tick_updates_clears_and_renders() {
    let (mut host, spy) = mounted_counter();
    assert_eq!(host.tick(), Tick::Continue);
    assert_eq!(host.effect().updates, 1);
    assert_eq!(host.frames(), 1);
    let writes = spy.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0], SurfaceWrite::Clear);
    assert!(matches!(writes[1], SurfaceWrite::Draw(DrawCmd::Circle { .. })));
}

#[test]
fn degenerate_surface_skips_frame_but_keeps_loop() {
    let mut host = EffectHost::new(Counter::default());
    let spy = RecordingSurface::new(Size::new(0.0, 0.0));
    host.mount(spy.clone());
    assert_eq!(host.tick(), Tick::Continue);
    assert_eq!(host.effect().updates, 0);
    assert_eq!(spy.write_count(), 0);

    assert!(host.on_resize(viewport()).is_ok());
    assert_eq!(host.tick(), Tick::Continue);
    assert_eq!(host.effect().updates, 1);
}

#[test]
fn render_failure_is_logged_and_loop_continues() {
    let mut host = EffectHost::new(Counter::default());
    host.mount(Broken(viewport()));
    assert_eq!(host.tick(), Tick::Continue);
    assert_eq!(host.tick(), Tick::Continue);
    assert_eq!(host.effect().updates, 2);
}

#[test]
fn resize_reaches_surface_synchronously() {
    let (mut host, spy) = mounted_counter();
    assert!(host.on_resize(Size::new(1024.0, 768.0)).is_ok());
    assert_eq!(spy.writes(), vec![SurfaceWrite::Resize(Size::new(1024.0, 768.0))]);
    assert_eq!(host.effect().resizes, vec![Size::new(1024.0, 768.0)]);
    assert_eq!(host.surface().map(|s| s.size()), Some(Size::new(1024.0, 768.0)));
}

#[test]
fn input_is_forwarded_while_running() {
    let (mut host, _spy) = mounted_counter();
    host.on_input(InputEvent::PointerMoved(Point::new(1.0, 2.0)));
    assert_eq!(host.effect().inputs, vec![InputEvent::PointerMoved(Point::new(1.0, 2.0))]);
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn unmount_returns_surface_and_stops() {
    let (mut host, _spy) = mounted_counter();
    assert!(host.unmount().is_some());
    assert_eq!(host.lifecycle(), Lifecycle::Unmounted);
    assert_eq!(host.tick(), Tick::Stop);
}

#[test]
fn unmount_is_idempotent() {
    let (mut host, _spy) = mounted_counter();
    assert!(host.unmount().is_some());
    assert!(host.unmount().is_none());
    assert_eq!(host.lifecycle(), Lifecycle::Unmounted);
}

#[test]
fn unmount_before_mount_is_safe() {
    let mut host: EffectHost<Counter, RecordingSurface> = EffectHost::new(Counter::default());
    assert!(host.unmount().is_none());
    assert_eq!(host.mount(RecordingSurface::new(viewport())), Tick::Stop);
    assert_eq!(host.effect().mounts, 0);
}

#[test]
fn events_after_unmount_produce_no_surface_writes() {
    let (mut host, spy) = mounted_counter();
    assert_eq!(host.tick(), Tick::Continue);
    host.unmount();
    spy.reset();

    assert!(host.on_resize(Size::new(200.0, 200.0)).is_ok());
    host.on_input(InputEvent::PointerMoved(Point::new(5.0, 5.0)));
    assert_eq!(host.tick(), Tick::Stop);

    assert_eq!(spy.write_count(), 0);
    assert!(host.effect().inputs.is_empty());
    assert!(host.effect().resizes.is_empty());
}

#[test]
fn real_engines_stop_writing_after_unmount() {
    fn check<E: Effect>(effect: E) {
        let spy = RecordingSurface::new(viewport());
        let mut host = EffectHost::new(effect);
        host.mount(spy.clone());
        host.on_input(InputEvent::PointerMoved(Point::new(100.0, 100.0)));
        for _ in 0..5 {
            assert_eq!(host.tick(), Tick::Continue);
        }
        assert!(spy.write_count() > 0);

        host.unmount();
        spy.reset();
        assert!(host.on_resize(Size::new(50.0, 50.0)).is_ok());
        host.on_input(InputEvent::PointerMoved(Point::new(1.0, 1.0)));
        host.on_input(InputEvent::PointerLeft);
        assert_eq!(host.tick(), Tick::Stop);
        assert_eq!(spy.write_count(), 0);
    }

    check(ParticleField::new(FieldConfig::default(), 17));
    check(ShapeMorpher::new(MorphConfig::default()));
    check(PointerIndicator::new(PointerConfig::default()));
}

#[test]
fn particle_host_draws_every_particle_each_frame() {
    let spy = RecordingSurface::new(viewport());
    let mut host = EffectHost::new(ParticleField::new(FieldConfig::default(), 3));
    host.mount(spy.clone());
    host.tick();
    let discs = spy.last_frame().iter().filter(|c| matches!(c, DrawCmd::Circle { .. })).count();
    assert_eq!(discs, 100);
}

#[test]
fn pointer_host_without_hover_targets_runs_unlabelled() {
    let spy = RecordingSurface::new(viewport());
    let mut host = EffectHost::new(PointerIndicator::new(PointerConfig::default()));
    host.mount(spy.clone());
    host.on_input(InputEvent::PointerMoved(Point::new(200.0, 150.0)));
    for _ in 0..30 {
        assert_eq!(host.tick(), Tick::Continue);
    }
    assert!(!host.effect().is_hovering());
    assert_eq!(host.effect().label(), "");
    let frame = spy.last_frame();
    assert_eq!(frame.len(), 2);
    assert!(!frame.iter().any(|cmd| matches!(cmd, DrawCmd::Label { .. })));
}
