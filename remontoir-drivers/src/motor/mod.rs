//! Motor driver implementations
//!
//! - PWM speed with an optional direction line, one per channel

pub mod pwm;

pub use pwm::{NoDirectionPin, PwmMotor, PwmMotorConfig};
