//! Hardware abstraction traits
//!
//! These traits define the interface between the cycle logic and the
//! board-specific collaborators (switch sampling, PWM output, console).

pub mod motor;
pub mod status;
pub mod switch;

pub use motor::{Direction, MotorActuator, MotorError};
pub use status::StatusSink;
pub use switch::{ChannelId, SwitchReader};
