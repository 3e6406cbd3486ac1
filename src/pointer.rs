//! Pointer indicator: a slow halo and a fast dot chasing the pointer, with a
//! hover label picked from the element under it.
//!
//! Every animated quantity (both marker positions, the fade, the hover
//! scales) is a [`Follower`]: it closes a fixed fraction of the remaining
//! distance each frame, independent of how often input events arrive.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use std::f64::consts::FRAC_PI_4;

use crate::color::Hsla;
use crate::config::PointerConfig;
use crate::consts::INVISIBLE_OPACITY;
use crate::engine::{Effect, InputEvent};
use crate::error::EffectError;
use crate::geom::{Point, Size};
use crate::surface::{Blend, DrawCmd, LinearGradient, Stroke, Surface};

/// First-order exponential smoothing toward a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Follower {
    pub value: f64,
    pub rate: f64,
}

impl Follower {
    #[must_use]
    pub fn new(value: f64, rate: f64) -> Self {
        Self { value, rate }
    }

    /// `value += (target - value) * rate`.
    pub fn follow(&mut self, target: f64) -> f64 {
        self.value += (target - self.value) * self.rate;
        self.value
    }
}

/// Two followers sharing a rate, one per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointFollower {
    x: Follower,
    y: Follower,
}

impl PointFollower {
    #[must_use]
    pub fn new(start: Point, rate: f64) -> Self {
        Self { x: Follower::new(start.x, rate), y: Follower::new(start.y, rate) }
    }

    pub fn follow(&mut self, target: Point) -> Point {
        Point::new(self.x.follow(target.x), self.y.follow(target.y))
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x.value, self.y.value)
    }
}

/// A role an interactive element can carry. Only some roles affect the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Primary call-to-action button.
    PrimaryAction,
    /// Project showcase card.
    ProjectCard,
    /// Skill card.
    SkillCard,
}

impl Role {
    fn bit(self) -> u8 {
        match self {
            Self::PrimaryAction => 1,
            Self::ProjectCard => 1 << 1,
            Self::SkillCard => 1 << 2,
        }
    }

    /// Map a CSS class to the role it marks.
    #[must_use]
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "btn-primary" => Some(Self::PrimaryAction),
            "project-card" => Some(Self::ProjectCard),
            "skill-card" => Some(Self::SkillCard),
            _ => None,
        }
    }
}

/// The set of roles carried by one hovered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Roles(u8);

impl Roles {
    /// No label-bearing role: a plain link, button, or nav item.
    #[must_use]
    pub fn none() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    #[must_use]
    pub fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// Collect roles from an element's class list.
    #[must_use]
    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        classes
            .into_iter()
            .filter_map(Role::from_class)
            .fold(Self::none(), Self::with)
    }

    /// Hover label by priority: primary action, project card, skill card.
    #[must_use]
    pub fn label(self) -> &'static str {
        if self.contains(Role::PrimaryAction) {
            "Click!"
        } else if self.contains(Role::ProjectCard) {
            "View"
        } else if self.contains(Role::SkillCard) {
            "Skill"
        } else {
            ""
        }
    }
}

/// 135° violet sweep, #667eea to #764ba2.
fn halo_gradient() -> LinearGradient {
    LinearGradient::new(3.0 * FRAC_PI_4, Hsla::new(229.0, 76.0, 66.0, 1.0), Hsla::new(270.0, 37.0, 46.0, 1.0))
}

fn dot_fill() -> Hsla {
    // #06b6d4
    Hsla::new(189.0, 94.0, 43.0, 1.0)
}

/// The pointer indicator engine.
pub struct PointerIndicator {
    config: PointerConfig,
    target: Point,
    halo: PointFollower,
    dot: PointFollower,
    opacity: Follower,
    halo_scale: Follower,
    dot_scale: Follower,
    in_viewport: bool,
    hovering: bool,
    label: &'static str,
}

impl PointerIndicator {
    #[must_use]
    pub fn new(config: PointerConfig) -> Self {
        let origin = Point::default();
        Self {
            halo: PointFollower::new(origin, config.halo_smoothing),
            dot: PointFollower::new(origin, config.dot_smoothing),
            opacity: Follower::new(0.0, config.fade_smoothing),
            halo_scale: Follower::new(1.0, config.scale_smoothing),
            dot_scale: Follower::new(1.0, config.scale_smoothing),
            config,
            target: origin,
            in_viewport: true,
            hovering: false,
            label: "",
        }
    }

    #[must_use]
    pub fn halo(&self) -> Point {
        self.halo.position()
    }

    #[must_use]
    pub fn dot(&self) -> Point {
        self.dot.position()
    }

    /// Raw pointer position the markers chase.
    #[must_use]
    pub fn target(&self) -> Point {
        self.target
    }

    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.value
    }

    #[must_use]
    pub fn halo_scale(&self) -> f64 {
        self.halo_scale.value
    }

    #[must_use]
    pub fn dot_scale(&self) -> f64 {
        self.dot_scale.value
    }

    /// Advance every follower one frame.
    pub fn step(&mut self) {
        self.halo.follow(self.target);
        self.dot.follow(self.target);
        self.opacity.follow(if self.in_viewport { 1.0 } else { 0.0 });
        let (halo_scale, dot_scale) =
            if self.hovering { (self.config.hover_halo_scale, self.config.hover_dot_scale) } else { (1.0, 1.0) };
        self.halo_scale.follow(halo_scale);
        self.dot_scale.follow(dot_scale);
    }
}

impl Effect for PointerIndicator {
    fn name(&self) -> &'static str {
        "pointer_indicator"
    }

    fn mount(&mut self, _size: Size) {
        self.in_viewport = true;
        self.hovering = false;
        self.label = "";
    }

    fn resize(&mut self, _size: Size) {}

    fn input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved(p) => self.target = p,
            InputEvent::PointerEntered => self.in_viewport = true,
            InputEvent::PointerLeft => self.in_viewport = false,
            InputEvent::HoverEntered(roles) => {
                self.hovering = true;
                self.label = roles.label();
            }
            InputEvent::HoverLeft => {
                self.hovering = false;
                self.label = "";
            }
        }
    }

    fn update(&mut self) {
        self.step();
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<(), EffectError> {
        let opacity = self.opacity.value;
        if opacity < INVISIBLE_OPACITY {
            return Ok(());
        }
        let c = &self.config;
        let halo = self.halo.position();

        surface.draw(&DrawCmd::GradientCircle {
            center: halo,
            radius: c.halo_radius * self.halo_scale.value,
            gradient: halo_gradient().fade(opacity),
            stroke: Some(Stroke::new(Hsla::white().fade(opacity), 2.0)),
            blend: Blend::Difference,
        })?;
        if !self.label.is_empty() {
            surface.draw(&DrawCmd::Label {
                text: self.label.to_owned(),
                at: halo,
                font_px: c.label_font_px,
                color: Hsla::white().fade(opacity),
            })?;
        }
        surface.draw(&DrawCmd::Circle {
            center: self.dot.position(),
            radius: c.dot_radius * self.dot_scale.value,
            fill: Some(dot_fill().fade(opacity)),
            stroke: None,
        })
    }
}
