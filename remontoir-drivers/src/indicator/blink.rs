//! Heartbeat LED
//!
//! A short flash once per period shows the firmware is alive; the period
//! tells the timing mode apart at a glance.

use embedded_hal::digital::OutputPin;
use remontoir_core::cycle::TimingMode;

/// On/off timing of the heartbeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkPattern {
    /// Full period
    pub period_ms: u32,
    /// Lit time at the start of each period
    pub on_ms: u32,
}

impl BlinkPattern {
    /// Slow heartbeat for normal mode
    pub const NORMAL: Self = Self {
        period_ms: 1000,
        on_ms: 100,
    };

    /// Fast heartbeat for test mode
    pub const TEST: Self = Self {
        period_ms: 200,
        on_ms: 100,
    };

    /// Pattern for a timing mode
    pub fn for_mode(mode: TimingMode) -> Self {
        match mode {
            TimingMode::Normal => Self::NORMAL,
            TimingMode::Test => Self::TEST,
        }
    }

    /// Check if the LED is lit at `now_ms` of uptime
    pub fn is_on(&self, now_ms: u32) -> bool {
        if self.period_ms == 0 {
            return false;
        }
        now_ms % self.period_ms < self.on_ms
    }
}

/// LED driven by a [`BlinkPattern`]
///
/// The pin is only written when the level changes.
pub struct StatusLed<P> {
    pin: P,
    pattern: BlinkPattern,
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create a new LED, switched off
    pub fn new(mut pin: P, pattern: BlinkPattern) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self {
            pin,
            pattern,
            lit: false,
        })
    }

    /// Current pattern
    pub fn pattern(&self) -> BlinkPattern {
        self.pattern
    }

    /// Switch to another pattern from the next update
    pub fn set_pattern(&mut self, pattern: BlinkPattern) {
        self.pattern = pattern;
    }

    /// Check if the LED is currently lit
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Drive the pin for `now_ms` of uptime
    pub fn update(&mut self, now_ms: u32) -> Result<(), P::Error> {
        let on = self.pattern.is_on(now_ms);
        if on == self.lit {
            return Ok(());
        }

        if on {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.lit = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: true,
                writes: 0,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_normal_pattern() {
        let pattern = BlinkPattern::for_mode(TimingMode::Normal);

        assert!(pattern.is_on(0));
        assert!(pattern.is_on(99));
        assert!(!pattern.is_on(100));
        assert!(!pattern.is_on(999));
        assert!(pattern.is_on(1000));
    }

    #[test]
    fn test_test_pattern() {
        let pattern = BlinkPattern::for_mode(TimingMode::Test);

        assert!(pattern.is_on(50));
        assert!(!pattern.is_on(150));
        assert!(pattern.is_on(250));
    }

    #[test]
    fn test_zero_period_stays_dark() {
        let pattern = BlinkPattern {
            period_ms: 0,
            on_ms: 100,
        };
        assert!(!pattern.is_on(0));
    }

    #[test]
    fn test_led_follows_pattern() {
        let mut led = StatusLed::new(MockPin::new(), BlinkPattern::NORMAL).unwrap();
        assert!(!led.pin.high);

        led.update(0).unwrap();
        assert!(led.is_lit());
        assert!(led.pin.high);

        led.update(500).unwrap();
        assert!(!led.is_lit());
        assert!(!led.pin.high);
    }

    #[test]
    fn test_led_writes_only_on_change() {
        let mut led = StatusLed::new(MockPin::new(), BlinkPattern::NORMAL).unwrap();
        let writes = led.pin.writes;

        for now in (0..100).step_by(10) {
            led.update(now).unwrap();
        }
        assert_eq!(led.pin.writes, writes + 1);
    }

    #[test]
    fn test_pattern_switch() {
        let mut led = StatusLed::new(MockPin::new(), BlinkPattern::NORMAL).unwrap();

        led.update(250).unwrap();
        assert!(!led.is_lit());

        led.set_pattern(BlinkPattern::for_mode(TimingMode::Test));
        led.update(250).unwrap();
        assert!(led.is_lit());
    }
}
