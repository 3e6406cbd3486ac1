//! HSL colors and their CSS serialization.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use serde::{Deserialize, Serialize};

/// A color in HSL space with alpha.
///
/// `hue` is in degrees, `saturation` and `lightness` in percent, `alpha` in
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    #[must_use]
    pub fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self { hue, saturation, lightness, alpha }
    }

    /// Opaque white.
    #[must_use]
    pub fn white() -> Self {
        Self::new(0.0, 0.0, 100.0, 1.0)
    }

    /// Same color with `alpha` replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Same color with alpha multiplied by `factor`.
    #[must_use]
    pub fn fade(self, factor: f64) -> Self {
        Self { alpha: self.alpha * factor, ..self }
    }

    /// Same color with hue rotated by `degrees`.
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        Self { hue: self.hue + degrees, ..self }
    }

    /// CSS `hsla()` notation, alpha clamped to `[0, 1]`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "hsla({:.1}, {:.1}%, {:.1}%, {:.3})",
            self.hue.rem_euclid(360.0),
            self.saturation,
            self.lightness,
            self.alpha.clamp(0.0, 1.0)
        )
    }
}
