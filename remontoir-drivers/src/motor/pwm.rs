//! PWM motor actuator
//!
//! One channel drives a pair of parallel-wired DC motors through a single
//! H-bridge: a PWM line for speed and a GPIO line for direction.
//!
//! This driver provides:
//! - Speed to duty cycle mapping with a minimum duty (dead zone below
//!   which the motors stall)
//! - Direction control, refused while the motors are turning
//!
//! Ramping is not done here. The cycle logic hands over a new speed every
//! tick and this driver applies it as-is.
//!
//! ```ignore
//! let mut motor = PwmMotor::new(pwm, Some(dir_pin), PwmMotorConfig::default())?;
//! motor.set_direction(Direction::Reverse)?;
//! motor.set_speed(150)?;
//! ```

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use remontoir_core::config::DEFAULT_MAX_SPEED;
use remontoir_core::traits::{Direction, MotorActuator, MotorError};

/// PWM motor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmMotorConfig {
    /// Speed that maps to 100 % duty
    pub max_speed: u8,
    /// Minimum duty cycle percentage (below this the motors won't turn)
    pub min_duty_percent: u8,
    /// Swap the direction line levels (motor wired the other way round)
    pub direction_inverted: bool,
}

impl Default for PwmMotorConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            min_duty_percent: 20,
            direction_inverted: false,
        }
    }
}

/// Placeholder for drivers without a direction line
///
/// Every write succeeds and goes nowhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectionPin;

impl ErrorType for NoDirectionPin {
    type Error = Infallible;
}

impl OutputPin for NoDirectionPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Motor actuator on a PWM channel plus optional direction pin
pub struct PwmMotor<P, D> {
    pwm: P,
    dir_pin: Option<D>,
    config: PwmMotorConfig,
    speed: u8,
    direction: Direction,
}

impl<P: SetDutyCycle> PwmMotor<P, NoDirectionPin> {
    /// Create a motor without direction control
    pub fn without_direction(pwm: P, config: PwmMotorConfig) -> Result<Self, MotorError> {
        Self::new(pwm, None, config)
    }
}

impl<P: SetDutyCycle, D: OutputPin> PwmMotor<P, D> {
    /// Create a new motor, stopped and facing forward
    ///
    /// Drives both outputs to their idle levels before returning.
    pub fn new(pwm: P, dir_pin: Option<D>, config: PwmMotorConfig) -> Result<Self, MotorError> {
        let mut motor = Self {
            pwm,
            dir_pin,
            config,
            speed: 0,
            direction: Direction::Forward,
        };
        motor.pwm.set_duty_cycle_fully_off().map_err(|_| MotorError::Pwm)?;
        motor.write_direction(Direction::Forward)?;
        Ok(motor)
    }

    /// Get the configuration
    pub fn config(&self) -> &PwmMotorConfig {
        &self.config
    }

    /// Check if direction control is available
    pub fn has_direction_control(&self) -> bool {
        self.dir_pin.is_some()
    }

    /// Scale a speed to a duty cycle in `0..=max_duty`
    ///
    /// Maps `1..=max_speed` onto `min_duty..=max_duty`; 0 is always off.
    pub fn scale_duty(&self, speed: u8, max_duty: u16) -> u16 {
        if speed == 0 || self.config.max_speed == 0 {
            return 0;
        }

        let max = max_duty as u32;
        let min = max * self.config.min_duty_percent.min(100) as u32 / 100;
        let speed = speed.min(self.config.max_speed) as u32;
        let scaled = min + (max - min) * speed / self.config.max_speed as u32;
        scaled.min(max) as u16
    }

    /// Release the underlying peripherals
    pub fn release(self) -> (P, Option<D>) {
        (self.pwm, self.dir_pin)
    }

    fn write_direction(&mut self, dir: Direction) -> Result<(), MotorError> {
        let Some(pin) = self.dir_pin.as_mut() else {
            return Ok(());
        };

        let high = (dir == Direction::Forward) != self.config.direction_inverted;
        if high {
            pin.set_high().map_err(|_| MotorError::Pin)
        } else {
            pin.set_low().map_err(|_| MotorError::Pin)
        }
    }
}

impl<P: SetDutyCycle, D: OutputPin> MotorActuator for PwmMotor<P, D> {
    fn set_direction(&mut self, dir: Direction) -> Result<(), MotorError> {
        if dir == self.direction {
            return Ok(());
        }
        // Only allow direction change when stopped
        if self.speed != 0 {
            return Err(MotorError::DirectionWhileMoving);
        }

        self.write_direction(dir)?;
        self.direction = dir;
        Ok(())
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn set_speed(&mut self, speed: u8) -> Result<(), MotorError> {
        if speed > self.config.max_speed {
            return Err(MotorError::SpeedOutOfRange);
        }

        let duty = self.scale_duty(speed, self.pwm.max_duty_cycle());
        self.pwm.set_duty_cycle(duty).map_err(|_| MotorError::Pwm)?;
        self.speed = speed;
        Ok(())
    }

    fn speed(&self) -> u8 {
        self.speed
    }
}
