//! State definitions
//!
//! A channel's behavior is a function of its accepted [`ChannelState`],
//! its current [`RunPhase`] and the phase clock.

use crate::traits::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Run/Pause pairs per block for the fixed-direction states
pub const REPEAT_COUNT_DRIVING: u8 = 12;
/// Run/Pause pairs per block for Alternating 1
pub const REPEAT_COUNT_ALT1: u8 = 12;
/// Run/Pause pairs per block for Alternating 2
pub const REPEAT_COUNT_ALT2: u8 = 6;

/// Position of a channel's 5-way selector switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SwitchPosition {
    /// Motors stopped
    #[default]
    Off,
    /// Turn left only
    Left,
    /// Turn right only
    Right,
    /// Alternate direction, 12 turns per block
    Alt1,
    /// Alternate direction, 6 turns per block, longer rest
    Alt2,
}

impl SwitchPosition {
    /// All positions, in detent order
    pub const ALL: [SwitchPosition; 5] = [
        SwitchPosition::Off,
        SwitchPosition::Left,
        SwitchPosition::Right,
        SwitchPosition::Alt1,
        SwitchPosition::Alt2,
    ];

    /// Convert a raw detent index to a position
    ///
    /// Unknown indices are treated as [`SwitchPosition::Off`].
    pub fn from_raw(raw: u8) -> Self {
        Self::ALL
            .get(raw as usize)
            .copied()
            .unwrap_or(SwitchPosition::Off)
    }

    /// Detent index of this position
    pub fn to_raw(self) -> u8 {
        match self {
            SwitchPosition::Off => 0,
            SwitchPosition::Left => 1,
            SwitchPosition::Right => 2,
            SwitchPosition::Alt1 => 3,
            SwitchPosition::Alt2 => 4,
        }
    }

    /// Human-readable label for status output
    pub fn label(self) -> &'static str {
        match self {
            SwitchPosition::Off => "off",
            SwitchPosition::Left => "left",
            SwitchPosition::Right => "right",
            SwitchPosition::Alt1 => "alt1",
            SwitchPosition::Alt2 => "alt2",
        }
    }
}

/// Accepted operating state of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChannelState {
    /// Switch off, motor held at zero
    #[default]
    Idle,
    /// Fixed forward rotation
    DrivingRight,
    /// Fixed reverse rotation
    DrivingLeft,
    /// Direction flips every repeat, 12 repeats per block
    Alternating1,
    /// Direction flips every repeat, 6 repeats per block
    Alternating2,
}

impl ChannelState {
    /// The state a switch position selects
    pub fn from_switch(position: SwitchPosition) -> Self {
        match position {
            SwitchPosition::Off => ChannelState::Idle,
            SwitchPosition::Left => ChannelState::DrivingLeft,
            SwitchPosition::Right => ChannelState::DrivingRight,
            SwitchPosition::Alt1 => ChannelState::Alternating1,
            SwitchPosition::Alt2 => ChannelState::Alternating2,
        }
    }

    /// The switch position that selects this state
    pub fn switch_position(self) -> SwitchPosition {
        match self {
            ChannelState::Idle => SwitchPosition::Off,
            ChannelState::DrivingLeft => SwitchPosition::Left,
            ChannelState::DrivingRight => SwitchPosition::Right,
            ChannelState::Alternating1 => SwitchPosition::Alt1,
            ChannelState::Alternating2 => SwitchPosition::Alt2,
        }
    }

    /// Run/Pause pairs before the long wait
    pub fn repeat_count(self) -> u8 {
        match self {
            ChannelState::Idle => 0,
            ChannelState::DrivingLeft | ChannelState::DrivingRight => REPEAT_COUNT_DRIVING,
            ChannelState::Alternating1 => REPEAT_COUNT_ALT1,
            ChannelState::Alternating2 => REPEAT_COUNT_ALT2,
        }
    }

    /// Direction of [`RunPhase::RunningForward`] in this state
    pub fn base_direction(self) -> Direction {
        match self {
            ChannelState::DrivingLeft => Direction::Reverse,
            _ => Direction::Forward,
        }
    }

    /// Check if the direction flips between repeats
    pub fn is_alternating(self) -> bool {
        matches!(self, ChannelState::Alternating1 | ChannelState::Alternating2)
    }

    /// Check if this state ever drives the motor
    pub fn is_active(self) -> bool {
        self != ChannelState::Idle
    }
}

/// Sub-state of an active channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunPhase {
    /// State just adopted, nothing commanded yet
    #[default]
    Initializing,
    /// Running in the state's base direction
    RunningForward,
    /// Running against the state's base direction (alternating states only)
    RunningReverse,
    /// Ramping down, then resting between runs
    Pausing,
    /// Long rest after a block of repeats
    Waiting,
}

impl RunPhase {
    /// Check if the motor is commanded toward full speed in this phase
    pub fn is_running(self) -> bool {
        matches!(self, RunPhase::RunningForward | RunPhase::RunningReverse)
    }

    /// The running phase that turns in `dir` for a state with `base` direction
    pub fn running_toward(dir: Direction, base: Direction) -> Self {
        if dir == base {
            RunPhase::RunningForward
        } else {
            RunPhase::RunningReverse
        }
    }

    /// Direction this phase drives in, if it is a running phase
    pub fn run_direction(self, base: Direction) -> Option<Direction> {
        match self {
            RunPhase::RunningForward => Some(base),
            RunPhase::RunningReverse => Some(base.opposite()),
            _ => None,
        }
    }
}
