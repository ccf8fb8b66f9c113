//! Winding cycle
//!
//! One [`ChannelController`] per motor channel. Each scheduler tick it
//! looks up its row in the transition [`table`], checks the phase clock
//! against the row's duration for the current [`TimingMode`], and steps
//! its [`SpeedRamp`] toward the row's speed target.

pub mod clock;
pub mod controller;
pub mod ramp;
pub mod table;
pub mod timing;

pub use clock::PhaseClock;
pub use controller::{ChannelController, ChannelStatus};
pub use ramp::{MotorCommand, SpeedRamp};
pub use table::{transition, CounterEffect, CycleKind, Expiry, SpeedTarget, Transition, TABLE};
pub use timing::{phase_deadline, Deadline, PhaseTimer, TimingMode};
