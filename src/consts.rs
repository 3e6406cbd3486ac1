//! Shared numeric defaults for the effect engines.

use std::f64::consts::TAU;

// ── Particle field ──────────────────────────────────────────────

/// Default number of particles in a field.
pub const PARTICLE_COUNT: usize = 100;

/// Half-width of the uniform range each velocity component is drawn from.
pub const PARTICLE_SPEED: f64 = 0.25;

/// Pointer distance inside which particles are pushed away.
pub const REPULSION_RADIUS: f64 = 100.0;

/// Scale applied to the repulsion nudge.
pub const REPULSION_STRENGTH: f64 = 0.001;

/// Pair distance under which a connecting line is drawn.
pub const LINK_DISTANCE: f64 = 80.0;

/// Global alpha multiplier for connecting lines.
pub const LINK_DIMMING: f64 = 0.3;

/// Mount fade-in duration of the full-canvas effects.
pub const FADE_IN_MS: f64 = 2000.0;

// ── Shape morpher ───────────────────────────────────────────────

/// Morph phase advance per frame, in radians.
pub const MORPH_PHASE_STEP: f64 = 0.02;

/// Rotation advance per frame, in radians.
pub const ROTATION_STEP: f64 = 0.005;

/// Morph phase period.
pub const MORPH_PERIOD: f64 = TAU;

/// Nominal frame duration used to advance the drift clock and fade-ins.
pub const FRAME_TIME_MS: f64 = 16.0;

/// The shapes wait this long after mount before fading in.
pub const MORPH_FADE_DELAY_MS: f64 = 500.0;

// ── Pointer indicator ───────────────────────────────────────────

/// Smoothing constant of the slow halo follower.
pub const HALO_SMOOTHING: f64 = 0.1;

/// Smoothing constant of the fast dot follower.
pub const DOT_SMOOTHING: f64 = 0.3;

/// Opacity below which the indicator is treated as invisible.
pub const INVISIBLE_OPACITY: f64 = 1e-3;

/// Selector matching every element that drives hover state.
pub const INTERACTIVE_SELECTOR: &str = "button, a, .project-card, .skill-card, .nav-link";
