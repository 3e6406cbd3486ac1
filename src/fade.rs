//! Mount-time fade-in shared by the full-canvas effects.

#[cfg(test)]
#[path = "fade_test.rs"]
mod fade_test;

/// Linear opacity ramp: zero until `delay_ms`, then rising to one over
/// `duration_ms`. A zero duration jumps straight to one once the delay ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeIn {
    delay_ms: f64,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl FadeIn {
    #[must_use]
    pub fn new(delay_ms: f64, duration_ms: f64) -> Self {
        Self { delay_ms, duration_ms, elapsed_ms: 0.0 }
    }

    /// Restart from fully transparent.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Move the ramp forward by one frame of `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) {
        if !self.is_complete() {
            self.elapsed_ms += dt_ms;
        }
    }

    /// Current opacity multiplier in `[0, 1]`.
    #[must_use]
    pub fn level(&self) -> f64 {
        let t = self.elapsed_ms - self.delay_ms;
        if t < 0.0 {
            0.0
        } else if self.duration_ms <= 0.0 {
            1.0
        } else {
            (t / self.duration_ms).min(1.0)
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.level() >= 1.0
    }
}
