//! Speed ramp
//!
//! Commanded speed only ever moves one step per tick, and the direction
//! is only ever changed at standstill. Both rules are enforced here and
//! nowhere else: callers just say where they want to go.

use crate::traits::Direction;

/// Output of one channel for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    /// Rotation direction
    pub direction: Direction,
    /// Speed on the `0..=max_speed` scale
    pub speed: u8,
}

impl MotorCommand {
    /// Create a stopped command
    pub const fn stopped(direction: Direction) -> Self {
        Self {
            direction,
            speed: 0,
        }
    }

    /// Check if this command stops the motor
    pub fn is_stopped(&self) -> bool {
        self.speed == 0
    }
}

/// Step-limited speed and direction state of one channel
#[derive(Debug, Clone)]
pub struct SpeedRamp {
    speed: u8,
    direction: Direction,
    max_speed: u8,
    step: u8,
}

impl SpeedRamp {
    /// Create a ramp at standstill, facing forward
    pub fn new(max_speed: u8, step: u8) -> Self {
        Self {
            speed: 0,
            direction: Direction::Forward,
            max_speed,
            step: step.max(1),
        }
    }

    /// Current commanded speed
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Current commanded direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current command
    pub fn command(&self) -> MotorCommand {
        MotorCommand {
            direction: self.direction,
            speed: self.speed,
        }
    }

    /// Check if the ramp is at standstill
    pub fn is_stopped(&self) -> bool {
        self.speed == 0
    }

    /// Advance one tick toward `target` in `direction`
    ///
    /// A direction different from the current one is adopted only once the
    /// speed is zero; until then the ramp slows down regardless of
    /// `target`. The tick that adopts a new direction also takes the first
    /// step toward `target`.
    pub fn step_toward(&mut self, direction: Direction, target: u8) -> MotorCommand {
        let target = target.min(self.max_speed);

        if direction != self.direction {
            if self.speed > 0 {
                self.speed = self.speed.saturating_sub(self.step);
                return self.command();
            }
            self.direction = direction;
        }

        if self.speed < target {
            self.speed = self.speed.saturating_add(self.step).min(target);
        } else if self.speed > target {
            self.speed = self.speed.saturating_sub(self.step).max(target);
        }

        self.command()
    }

    /// Advance one tick toward standstill, keeping the direction
    pub fn ramp_down(&mut self) -> MotorCommand {
        self.step_toward(self.direction, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_up_stops_at_max() {
        let mut ramp = SpeedRamp::new(150, 10);
        for i in 1..=15u8 {
            let cmd = ramp.step_toward(Direction::Forward, 150);
            assert_eq!(cmd.speed, i * 10);
        }
        assert_eq!(ramp.step_toward(Direction::Forward, 150).speed, 150);
    }

    #[test]
    fn test_no_overshoot_with_uneven_step() {
        let mut ramp = SpeedRamp::new(25, 10);
        let speeds: [u8; 4] = core::array::from_fn(|_| ramp.step_toward(Direction::Forward, 255).speed);
        assert_eq!(speeds, [10, 20, 25, 25]);

        let speeds: [u8; 4] = core::array::from_fn(|_| ramp.ramp_down().speed);
        assert_eq!(speeds, [15, 5, 0, 0]);
    }

    #[test]
    fn test_reversal_waits_for_standstill() {
        let mut ramp = SpeedRamp::new(150, 10);
        for _ in 0..15 {
            ramp.step_toward(Direction::Forward, 150);
        }

        // Asking for reverse at full speed only slows the motor down
        for expected in (0..15u8).rev() {
            let cmd = ramp.step_toward(Direction::Reverse, 150);
            assert_eq!(cmd.direction, Direction::Forward);
            assert_eq!(cmd.speed, expected * 10);
        }

        // At standstill the direction flips and the ramp starts climbing
        let cmd = ramp.step_toward(Direction::Reverse, 150);
        assert_eq!(cmd.direction, Direction::Reverse);
        assert_eq!(cmd.speed, 10);
    }

    #[test]
    fn test_reversal_at_standstill_is_immediate() {
        let mut ramp = SpeedRamp::new(150, 10);
        let cmd = ramp.step_toward(Direction::Reverse, 0);
        assert_eq!(cmd, MotorCommand::stopped(Direction::Reverse));
    }

    #[test]
    fn test_ramp_down_keeps_direction() {
        let mut ramp = SpeedRamp::new(150, 10);
        ramp.step_toward(Direction::Reverse, 150);
        ramp.step_toward(Direction::Reverse, 150);
        assert_eq!(ramp.ramp_down(), MotorCommand { direction: Direction::Reverse, speed: 10 });
        assert_eq!(ramp.ramp_down(), MotorCommand::stopped(Direction::Reverse));
        assert!(ramp.is_stopped());
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let mut ramp = SpeedRamp::new(3, 0);
        assert_eq!(ramp.step_toward(Direction::Forward, 3).speed, 1);
    }
}
