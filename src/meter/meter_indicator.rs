/// How long an indicator takes to fall back to zero after a bounce.
pub const DECAY_MS: f64 = 250.0;

/// One activity indicator: rises instantly to the reported level, then
/// decays linearly to zero over [`DECAY_MS`]. A bounce, not a smoothed
/// average; a fresh signal restarts the decay from its own level.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterIndicator {
    peak: f64,
    elapsed_ms: f64,
}

impl Default for MeterIndicator {
    fn default() -> Self {
        Self {
            peak: 0.0,
            elapsed_ms: DECAY_MS,
        }
    }
}

impl MeterIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instant rise to `level`; decay restarts.
    pub fn bounce(&mut self, level: f64) {
        self.peak = level;
        self.elapsed_ms = 0.0;
    }

    /// Advances the decay clock. The embedder calls this from its render
    /// loop; the engine has no timer of its own.
    pub fn tick(&mut self, dt_ms: f64) {
        if dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(DECAY_MS);
        }
    }

    /// Current display level in `[0, peak]`.
    #[must_use]
    pub fn level(&self) -> f64 {
        if self.elapsed_ms >= DECAY_MS {
            0.0
        } else {
            self.peak * (1.0 - self.elapsed_ms / DECAY_MS)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn starts_silent() {
        assert_eq!(MeterIndicator::new().level(), 0.0);
    }

    #[test]
    fn bounce_rises_instantly_then_decays_to_zero() {
        let mut meter = MeterIndicator::new();
        meter.bounce(0.8);
        assert_eq!(meter.level(), 0.8);

        meter.tick(125.0);
        assert_eq!(meter.level(), 0.4);

        meter.tick(125.0);
        assert_eq!(meter.level(), 0.0);

        meter.tick(1_000.0);
        assert_eq!(meter.level(), 0.0);
    }

    #[test]
    fn fresh_bounce_restarts_the_decay() {
        let mut meter = MeterIndicator::new();
        meter.bounce(0.8);
        meter.tick(200.0);
        meter.bounce(0.5);
        assert_eq!(meter.level(), 0.5);
    }

    #[test]
    fn zero_bounce_resets_immediately() {
        let mut meter = MeterIndicator::new();
        meter.bounce(0.9);
        meter.bounce(0.0);
        assert_eq!(meter.level(), 0.0);
    }
}
