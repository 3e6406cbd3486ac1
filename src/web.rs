//! Browser mounting: animation-frame loop and DOM listener wiring.
//!
//! Each `mount_*` function sizes the canvas to the viewport, starts an
//! [`EffectHost`] against a [`CanvasSurface`], schedules frames with
//! `requestAnimationFrame`, and registers every listener it adds in one
//! [`ListenerTable`]. The returned [`MountedEffect`] tears all of it down on
//! [`MountedEffect::unmount`] or on drop.
//!
//! Shared ownership follows the usual single-threaded wasm shape:
//! `Rc<RefCell<_>>` around the host, closures holding clones of the `Rc`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use crate::config::{FieldConfig, MorphConfig, PointerConfig};
use crate::consts::INTERACTIVE_SELECTOR;
use crate::engine::{Effect, EffectHost, InputEvent, Lifecycle, Tick};
use crate::error::EffectError;
use crate::geom::{Point, Size};
use crate::listeners::{ListenerTable, Subscription};
use crate::particles::ParticleField;
use crate::pointer::{PointerIndicator, Roles};
use crate::render::CanvasSurface;
use crate::shapes::ShapeMorpher;
use crate::surface::Surface;

type SharedHost<E> = Rc<RefCell<EffectHost<E, CanvasSurface>>>;
type FrameCallback = Closure<dyn FnMut(f64)>;

// =============================================================
// Entry points
// =============================================================

/// Mount the particle field on `canvas`.
///
/// The field seeds from `config.seed` when set, otherwise from
/// `Math.random()`.
///
/// # Errors
///
/// Returns an error if the config is invalid, the browser globals or the
/// canvas context are unavailable, or a listener cannot be attached.
pub fn mount_particle_field(
    canvas: HtmlCanvasElement,
    config: &FieldConfig,
) -> Result<MountedEffect<ParticleField>, EffectError> {
    config.validate()?;
    let seed = js_sys::Math::random().to_bits();
    let mut mounted = mount(canvas, ParticleField::new(config.clone(), seed))?;
    let window = mounted.window.clone();
    let document = document(&window)?;
    mounted.listen(&window, "mousemove", pointer_moved)?;
    mounted.listen(&document, "mouseleave", |_| Some(InputEvent::PointerLeft))?;
    mounted.log_mounted();
    Ok(mounted)
}

/// Mount the morphing shapes on `canvas`. Only resize is observed.
///
/// # Errors
///
/// Returns an error if the config is invalid, the browser globals or the
/// canvas context are unavailable, or a listener cannot be attached.
pub fn mount_shape_morpher(
    canvas: HtmlCanvasElement,
    config: &MorphConfig,
) -> Result<MountedEffect<ShapeMorpher>, EffectError> {
    config.validate()?;
    let mounted = mount(canvas, ShapeMorpher::new(config.clone()))?;
    mounted.log_mounted();
    Ok(mounted)
}

/// Mount the pointer indicator on `canvas`.
///
/// Hover listeners are attached to every element matching
/// [`INTERACTIVE_SELECTOR`] present at mount time. No match is not an error.
///
/// # Errors
///
/// Returns an error if the config is invalid, the browser globals or the
/// canvas context are unavailable, or a listener cannot be attached.
pub fn mount_pointer_indicator(
    canvas: HtmlCanvasElement,
    config: &PointerConfig,
) -> Result<MountedEffect<PointerIndicator>, EffectError> {
    config.validate()?;
    let mut mounted = mount(canvas, PointerIndicator::new(config.clone()))?;
    let document = document(&mounted.window)?;
    mounted.listen(&document, "mousemove", pointer_moved)?;
    mounted.listen(&document, "mouseenter", |_| Some(InputEvent::PointerEntered))?;
    mounted.listen(&document, "mouseleave", |_| Some(InputEvent::PointerLeft))?;

    let matches = document.query_selector_all(INTERACTIVE_SELECTOR)?;
    let mut hover_targets = 0_u32;
    for i in 0..matches.length() {
        let Some(node) = matches.item(i) else {
            continue;
        };
        let Ok(element) = node.dyn_into::<Element>() else {
            continue;
        };
        let hovered = element.clone();
        mounted.listen(&element, "mouseenter", move |_| Some(InputEvent::HoverEntered(roles_of(&hovered))))?;
        mounted.listen(&element, "mouseleave", |_| Some(InputEvent::HoverLeft))?;
        hover_targets += 1;
    }
    tracing::debug!(selector = INTERACTIVE_SELECTOR, hover_targets, "hover listeners attached");

    mounted.log_mounted();
    Ok(mounted)
}

/// Common mount path: size, start, schedule, observe resize.
fn mount<E: Effect + 'static>(canvas: HtmlCanvasElement, effect: E) -> Result<MountedEffect<E>, EffectError> {
    let window = web_sys::window().ok_or(EffectError::BrowserUnavailable)?;
    let mut surface = CanvasSurface::from_canvas(canvas)?;
    surface.resize(viewport_size(&window)?)?;

    let mut host = EffectHost::new(effect);
    host.mount(surface);
    let mut mounted = MountedEffect { host: Rc::new(RefCell::new(host)), listeners: ListenerTable::new(), window };

    // Anything that fails from here on drops `mounted`, which releases
    // whatever was already registered.
    let frames = FrameLoop::start(&mounted.window, &mounted.host)?;
    mounted.listeners.register(frames);

    let resize = {
        let window = mounted.window.clone();
        let host = Rc::clone(&mounted.host);
        move |_event: Event| match viewport_size(&window) {
            Ok(size) => with_host(&host, |host| {
                if let Err(err) = host.on_resize(size) {
                    tracing::warn!(effect = host.effect().name(), error = %err, "resize failed");
                }
            }),
            Err(err) => tracing::warn!(error = %err, "viewport size unavailable"),
        }
    };
    let window = mounted.window.clone();
    mounted.listeners.register(DomListener::attach(&window, "resize", resize)?);
    Ok(mounted)
}

// =============================================================
// Mounted handle
// =============================================================

/// A running effect and everything it holds from the page.
pub struct MountedEffect<E: Effect> {
    host: SharedHost<E>,
    listeners: ListenerTable,
    window: Window,
}

impl<E: Effect> MountedEffect<E> {
    /// Stop the frame loop and remove every listener. Idempotent.
    pub fn unmount(&mut self) {
        with_host(&self.host, |host| {
            host.unmount();
        });
        self.listeners.release_all();
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.host.try_borrow().is_ok_and(|host| host.lifecycle() == Lifecycle::Running)
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.host.try_borrow().map_or(0, |host| host.frames())
    }
}

impl<E: Effect + 'static> MountedEffect<E> {
    /// Forward browser events on `target` to the effect, translated by `translate`.
    fn listen<F>(&mut self, target: &EventTarget, event: &'static str, translate: F) -> Result<(), EffectError>
    where
        F: Fn(&Event) -> Option<InputEvent> + 'static,
    {
        let host = Rc::clone(&self.host);
        let handler = move |event: Event| {
            if let Some(input) = translate(&event) {
                with_host(&host, |host| host.on_input(input));
            }
        };
        self.listeners.register(DomListener::attach(target, event, handler)?);
        Ok(())
    }

    fn log_mounted(&self) {
        let name = self.host.try_borrow().map_or("unknown", |host| host.effect().name());
        tracing::info!(effect = name, subscriptions = self.listeners.len(), "effect mounted");
    }
}

impl<E: Effect> Drop for MountedEffect<E> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Run `f` against the host unless it is already borrowed by an outer frame.
fn with_host<E: Effect>(host: &SharedHost<E>, f: impl FnOnce(&mut EffectHost<E, CanvasSurface>)) {
    match host.try_borrow_mut() {
        Ok(mut host) => f(&mut host),
        Err(_) => tracing::trace!("host busy; event dropped"),
    }
}

// =============================================================
// Subscriptions
// =============================================================

/// An `addEventListener` registration.
struct DomListener {
    target: EventTarget,
    event: &'static str,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl DomListener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, EffectError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback: Some(callback) })
    }
}

impl Subscription for DomListener {
    fn describe(&self) -> String {
        format!("listener:{}", self.event)
    }

    fn release(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };
        if let Err(err) = self.target.remove_event_listener_with_callback(self.event, callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event = self.event, error = %EffectError::js(&err), "listener removal failed");
        }
    }
}

/// The `requestAnimationFrame` chain for one host.
///
/// The callback reschedules itself only while the host answers
/// [`Tick::Continue`]. Release cancels the pending request and drops the
/// callback, which also breaks the callback's reference to itself.
struct FrameLoop {
    window: Window,
    pending: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    fn start<E: Effect + 'static>(window: &Window, host: &SharedHost<E>) -> Result<Self, EffectError> {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let holder: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let cb = {
            let window = window.clone();
            let host = Rc::clone(host);
            let pending = Rc::clone(&pending);
            let holder = Rc::clone(&holder);
            Closure::wrap(Box::new(move |_ts: f64| {
                pending.set(None);
                let tick = match host.try_borrow_mut() {
                    Ok(mut host) => host.tick(),
                    Err(_) => Tick::Continue,
                };
                if tick == Tick::Stop {
                    return;
                }
                if let Some(cb) = holder.borrow().as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => pending.set(Some(id)),
                        Err(err) => tracing::warn!(error = %EffectError::js(&err), "frame request failed"),
                    }
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        pending.set(Some(id));
        *holder.borrow_mut() = Some(cb);
        Ok(Self { window: window.clone(), pending, callback: holder })
    }
}

impl Subscription for FrameLoop {
    fn describe(&self) -> String {
        "animation-frame".to_owned()
    }

    fn release(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                tracing::warn!(error = %EffectError::js(&err), "frame cancel failed");
            }
        }
        drop(self.callback.borrow_mut().take());
    }
}

// =============================================================
// DOM helpers
// =============================================================

fn document(window: &Window) -> Result<web_sys::Document, EffectError> {
    window.document().ok_or(EffectError::BrowserUnavailable)
}

fn viewport_size(window: &Window) -> Result<Size, EffectError> {
    let width = window.inner_width()?.as_f64().ok_or(EffectError::BrowserUnavailable)?;
    let height = window.inner_height()?.as_f64().ok_or(EffectError::BrowserUnavailable)?;
    Ok(Size::new(width, height))
}

fn pointer_moved(event: &Event) -> Option<InputEvent> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(InputEvent::PointerMoved(Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))))
}

fn roles_of(element: &Element) -> Roles {
    let list = element.class_list();
    let classes: Vec<String> = (0..list.length()).filter_map(|i| list.item(i)).collect();
    Roles::from_classes(classes.iter().map(String::as_str))
}
