//! Motor actuator trait
//!
//! A channel is a pair of parallel-wired DC motors behind one driver, so
//! the actuator only sees a direction and a speed on the winder's
//! `0..=max_speed` scale. The cycle logic guarantees that direction is
//! only changed at standstill; implementations are still expected to
//! refuse a reversal while moving.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor rotation direction
///
/// Which physical sense is "forward" depends on how the channel is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Forward rotation (the "right" switch position)
    #[default]
    Forward,
    /// Reverse rotation (the "left" switch position)
    Reverse,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Direction change requested while the motor is moving
    DirectionWhileMoving,
    /// Speed above the configured maximum
    SpeedOutOfRange,
    /// PWM peripheral rejected the duty cycle
    Pwm,
    /// Direction pin could not be driven
    Pin,
}

/// Trait for the per-channel speed/direction output
pub trait MotorActuator {
    /// Set the rotation direction
    ///
    /// Must fail with [`MotorError::DirectionWhileMoving`] if the current
    /// speed is not zero and `dir` differs from the current direction.
    fn set_direction(&mut self, dir: Direction) -> Result<(), MotorError>;

    /// Get the current direction
    fn direction(&self) -> Direction;

    /// Set the output speed (`0..=max_speed`)
    fn set_speed(&mut self, speed: u8) -> Result<(), MotorError>;

    /// Get the current output speed
    fn speed(&self) -> u8;

    /// Check if the motor is at standstill
    fn is_stopped(&self) -> bool {
        self.speed() == 0
    }
}
