//! Switch debouncing

use remontoir_core::state::SwitchPosition;

/// Consecutive identical samples needed to accept a new position
pub const DEFAULT_DEBOUNCE_SAMPLES: u8 = 3;

/// Accepts a position only after it was sampled N times in a row
///
/// Until then the last accepted position is reported. Starts at
/// [`SwitchPosition::Off`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    accepted: SwitchPosition,
    candidate: SwitchPosition,
    count: u8,
    samples: u8,
}

impl Debouncer {
    /// Create a debouncer needing `samples` agreeing readings
    pub fn new(samples: u8) -> Self {
        Self {
            accepted: SwitchPosition::Off,
            candidate: SwitchPosition::Off,
            count: 0,
            samples: samples.max(1),
        }
    }

    /// Feed one sample, returns the accepted position
    pub fn update(&mut self, sample: SwitchPosition) -> SwitchPosition {
        if sample == self.accepted {
            self.candidate = sample;
            self.count = 0;
            return self.accepted;
        }

        if sample == self.candidate {
            self.count = self.count.saturating_add(1);
        } else {
            self.candidate = sample;
            self.count = 1;
        }

        if self.count >= self.samples {
            self.accepted = sample;
            self.count = 0;
        }
        self.accepted
    }

    /// Last accepted position
    pub fn position(&self) -> SwitchPosition {
        self.accepted
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_SAMPLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_agreeing_samples() {
        let mut deb = Debouncer::default();

        assert_eq!(deb.update(SwitchPosition::Right), SwitchPosition::Off);
        assert_eq!(deb.update(SwitchPosition::Right), SwitchPosition::Off);
        assert_eq!(deb.update(SwitchPosition::Right), SwitchPosition::Right);
        assert_eq!(deb.position(), SwitchPosition::Right);
    }

    #[test]
    fn test_bounce_restarts_count() {
        let mut deb = Debouncer::default();

        deb.update(SwitchPosition::Alt1);
        deb.update(SwitchPosition::Alt1);
        deb.update(SwitchPosition::Alt2);
        assert_eq!(deb.update(SwitchPosition::Alt1), SwitchPosition::Off);
        assert_eq!(deb.update(SwitchPosition::Alt1), SwitchPosition::Off);
        assert_eq!(deb.update(SwitchPosition::Alt1), SwitchPosition::Alt1);
    }

    #[test]
    fn test_glitch_back_to_accepted() {
        let mut deb = Debouncer::default();
        for _ in 0..3 {
            deb.update(SwitchPosition::Left);
        }

        // A single stray sample never wins
        assert_eq!(deb.update(SwitchPosition::Off), SwitchPosition::Left);
        assert_eq!(deb.update(SwitchPosition::Left), SwitchPosition::Left);
        assert_eq!(deb.update(SwitchPosition::Off), SwitchPosition::Left);
        assert_eq!(deb.update(SwitchPosition::Off), SwitchPosition::Left);
        assert_eq!(deb.update(SwitchPosition::Left), SwitchPosition::Left);
    }

    #[test]
    fn test_single_sample_passes_through() {
        let mut deb = Debouncer::new(0);
        assert_eq!(deb.update(SwitchPosition::Alt2), SwitchPosition::Alt2);
        assert_eq!(deb.update(SwitchPosition::Off), SwitchPosition::Off);
    }
}
