//! Engine configuration.
//!
//! Every field has a default matching the shipped look, so hosts usually
//! pass `EffectsConfig::default()` or a sparse JSON override:
//!
//! ```json
//! { "field": { "particle_count": 60 }, "pointer": { "halo_smoothing": 0.2 } }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DOT_SMOOTHING, FADE_IN_MS, FRAME_TIME_MS, HALO_SMOOTHING, LINK_DIMMING, LINK_DISTANCE, MORPH_FADE_DELAY_MS,
    MORPH_PHASE_STEP, PARTICLE_COUNT, PARTICLE_SPEED, REPULSION_RADIUS, REPULSION_STRENGTH, ROTATION_STEP,
};
use crate::error::EffectError;

/// How the pointer nudge is applied to a particle inside the repulsion radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepulsionMode {
    /// Nudge both velocity components.
    #[default]
    Symmetric,
    /// Nudge `vx` but displace `y` directly instead of its velocity.
    Legacy,
}

/// Configuration for all three engines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub field: FieldConfig,
    pub morph: MorphConfig,
    pub pointer: PointerConfig,
}

impl EffectsConfig {
    /// Parse a (possibly sparse) JSON document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::Config`] on malformed JSON and
    /// [`EffectError::InvalidConfig`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, EffectError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EffectError> {
        self.field.validate()?;
        self.morph.validate()?;
        self.pointer.validate()
    }
}

/// Particle field settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Half-width of the velocity component range.
    pub speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    pub hue_min: f64,
    pub hue_max: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    pub repulsion_mode: RepulsionMode,
    pub link_distance: f64,
    pub link_dimming: f64,
    pub link_width: f64,
    /// Canvas fade-in after mount; zero disables it.
    pub fade_in_ms: f64,
    pub fade_delay_ms: f64,
    /// Reseed the whole field when the surface is resized.
    pub reseed_on_resize: bool,
    /// Fixed RNG seed. The browser layer picks one when absent.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            speed: PARTICLE_SPEED,
            radius_min: 1.0,
            radius_max: 4.0,
            opacity_min: 0.2,
            opacity_max: 0.7,
            hue_min: 200.0,
            hue_max: 260.0,
            saturation: 70.0,
            lightness: 60.0,
            repulsion_radius: REPULSION_RADIUS,
            repulsion_strength: REPULSION_STRENGTH,
            repulsion_mode: RepulsionMode::Symmetric,
            link_distance: LINK_DISTANCE,
            link_dimming: LINK_DIMMING,
            link_width: 1.0,
            fade_in_ms: FADE_IN_MS,
            fade_delay_ms: 0.0,
            reseed_on_resize: false,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Check this section on its own.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EffectError> {
        ordered("field.radius", self.radius_min, self.radius_max)?;
        ordered("field.opacity", self.opacity_min, self.opacity_max)?;
        ordered("field.hue", self.hue_min, self.hue_max)?;
        non_negative("field.speed", self.speed)?;
        positive("field.repulsion_radius", self.repulsion_radius)?;
        positive("field.link_distance", self.link_distance)?;
        non_negative("field.fade_in_ms", self.fade_in_ms)?;
        non_negative("field.fade_delay_ms", self.fade_delay_ms)?;
        unit_interval("field.link_dimming", self.link_dimming)
    }
}

/// Shape morpher settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Morph phase advance per frame, radians.
    pub phase_step: f64,
    /// Rotation advance per frame, radians.
    pub rotation_step: f64,
    /// Drift clock advance per frame.
    pub frame_time_ms: f64,
    /// Drift clock to sinusoid argument scale.
    pub drift_rate: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub scale_base: f64,
    pub scale_range: f64,
    pub hue_shift: f64,
    pub fill_alpha: f64,
    pub stroke_alpha: f64,
    pub line_width: f64,
    /// Canvas fade-in after mount; zero disables it.
    pub fade_in_ms: f64,
    pub fade_delay_ms: f64,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            phase_step: MORPH_PHASE_STEP,
            rotation_step: ROTATION_STEP,
            frame_time_ms: FRAME_TIME_MS,
            drift_rate: 0.001,
            drift_x: 0.3,
            drift_y: 0.5,
            scale_base: 0.8,
            scale_range: 0.4,
            hue_shift: 60.0,
            fill_alpha: 0.3,
            stroke_alpha: 0.8,
            line_width: 3.0,
            fade_in_ms: FADE_IN_MS,
            fade_delay_ms: MORPH_FADE_DELAY_MS,
        }
    }
}

impl MorphConfig {
    /// Check this section on its own.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EffectError> {
        positive("morph.phase_step", self.phase_step)?;
        non_negative("morph.fade_in_ms", self.fade_in_ms)?;
        non_negative("morph.fade_delay_ms", self.fade_delay_ms)?;
        unit_interval("morph.fill_alpha", self.fill_alpha)?;
        unit_interval("morph.stroke_alpha", self.stroke_alpha)
    }
}

/// Pointer indicator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub halo_smoothing: f64,
    pub dot_smoothing: f64,
    /// Smoothing of the visibility fade.
    pub fade_smoothing: f64,
    /// Smoothing of the hover scale change.
    pub scale_smoothing: f64,
    pub halo_radius: f64,
    pub dot_radius: f64,
    pub hover_halo_scale: f64,
    pub hover_dot_scale: f64,
    pub label_font_px: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            halo_smoothing: HALO_SMOOTHING,
            dot_smoothing: DOT_SMOOTHING,
            fade_smoothing: 0.15,
            scale_smoothing: 0.2,
            halo_radius: 20.0,
            dot_radius: 4.0,
            hover_halo_scale: 1.5,
            hover_dot_scale: 0.5,
            label_font_px: 12.0,
        }
    }
}

impl PointerConfig {
    /// Check this section on its own.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), EffectError> {
        smoothing("pointer.halo_smoothing", self.halo_smoothing)?;
        smoothing("pointer.dot_smoothing", self.dot_smoothing)?;
        smoothing("pointer.fade_smoothing", self.fade_smoothing)?;
        smoothing("pointer.scale_smoothing", self.scale_smoothing)?;
        positive("pointer.halo_radius", self.halo_radius)?;
        positive("pointer.dot_radius", self.dot_radius)
    }
}

// =============================================================
// Validation helpers
// =============================================================

fn invalid(field: &str, detail: &str) -> EffectError {
    EffectError::InvalidConfig(format!("{field} {detail}"))
}

fn ordered(field: &str, min: f64, max: f64) -> Result<(), EffectError> {
    if min <= max { Ok(()) } else { Err(invalid(field, "range has min above max")) }
}

fn positive(field: &str, value: f64) -> Result<(), EffectError> {
    if value > 0.0 { Ok(()) } else { Err(invalid(field, "must be positive")) }
}

fn non_negative(field: &str, value: f64) -> Result<(), EffectError> {
    if value >= 0.0 { Ok(()) } else { Err(invalid(field, "must not be negative")) }
}

fn unit_interval(field: &str, value: f64) -> Result<(), EffectError> {
    if (0.0..=1.0).contains(&value) { Ok(()) } else { Err(invalid(field, "must be within [0, 1]")) }
}

fn smoothing(field: &str, value: f64) -> Result<(), EffectError> {
    if value > 0.0 && value <= 1.0 { Ok(()) } else { Err(invalid(field, "must be within (0, 1]")) }
}
