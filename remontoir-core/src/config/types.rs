//! Configuration type definitions
//!
//! All durations are in milliseconds of the scheduler clock. Speeds are
//! in actuator units on a `0..=max_speed` scale.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scheduler tick period
pub const TICK_INTERVAL_MS: u32 = 100;

/// Full-scale commanded speed
pub const DEFAULT_MAX_SPEED: u8 = 150;

/// Speed change applied per tick while ramping
pub const DEFAULT_RAMP_STEP: u8 = 10;

const SECOND_MS: u32 = 1_000;
const MINUTE_MS: u32 = 60 * SECOND_MS;

/// Errors found when validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `max_speed` is zero, the motor could never move
    ZeroMaxSpeed,
    /// `ramp_step` is zero, the ramp would never converge
    ZeroRampStep,
    /// `ramp_step` is larger than `max_speed`
    RampStepExceedsMaxSpeed,
    /// `tick_ms` is zero
    ZeroTickPeriod,
    /// A test-mode divisor is zero
    ZeroTestFactor,
}

/// Phase durations and their test-mode divisors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingTable {
    /// Run phase length
    pub run_ms: u32,
    /// Pause dwell, counted from standstill
    pub pause_ms: u32,
    /// Long wait for Left/Right and Alternating 1
    pub wait_ms: u32,
    /// Long wait for Alternating 2
    pub wait_long_ms: u32,
    /// Test-mode divisor for the run phase
    pub run_test_factor: u32,
    /// Test-mode divisor for the pause phase
    pub pause_test_factor: u32,
    /// Test-mode divisor for both wait phases
    pub wait_test_factor: u32,
}

impl Default for TimingTable {
    fn default() -> Self {
        Self {
            run_ms: 30 * SECOND_MS,
            pause_ms: 30 * SECOND_MS,
            wait_ms: 18 * MINUTE_MS,
            wait_long_ms: 27 * MINUTE_MS,
            run_test_factor: 10,
            pause_test_factor: 10,
            wait_test_factor: 40,
        }
    }
}

/// Winder configuration shared by both channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WinderConfig {
    /// Full-scale speed (actuator units)
    pub max_speed: u8,
    /// Speed change per tick while ramping
    pub ramp_step: u8,
    /// Scheduler tick period
    pub tick_ms: u32,
    /// Phase durations
    pub timing: TimingTable,
}

impl Default for WinderConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            ramp_step: DEFAULT_RAMP_STEP,
            tick_ms: TICK_INTERVAL_MS,
            timing: TimingTable::default(),
        }
    }
}

impl WinderConfig {
    /// Check the configuration for values the cycle logic cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_speed == 0 {
            return Err(ConfigError::ZeroMaxSpeed);
        }
        if self.ramp_step == 0 {
            return Err(ConfigError::ZeroRampStep);
        }
        if self.ramp_step > self.max_speed {
            return Err(ConfigError::RampStepExceedsMaxSpeed);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }

        let t = &self.timing;
        if t.run_test_factor == 0 || t.pause_test_factor == 0 || t.wait_test_factor == 0 {
            return Err(ConfigError::ZeroTestFactor);
        }

        Ok(())
    }

    /// Ticks needed to ramp between standstill and full speed
    pub fn ramp_ticks(&self) -> u32 {
        let step = self.ramp_step.max(1) as u32;
        (self.max_speed as u32 + step - 1) / step
    }
}
