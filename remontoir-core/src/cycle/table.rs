//! Cycle transition table
//!
//! Every (channel state, run phase) pair maps to one [`Transition`] row:
//! which timer bounds the phase, what speed the ramp is steered toward,
//! where the phase goes when its timer expires and what happens to the
//! repeat counter on the way. Left/Right share rows, as do the two
//! alternating programs; only the wait length and repeat count differ,
//! and those come from [`ChannelState`] itself.

use super::timing::PhaseTimer;
use crate::state::{ChannelState, RunPhase};

/// Rows are shared between states that cycle the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleKind {
    /// Switch off
    Idle,
    /// One fixed direction (Left, Right)
    Fixed,
    /// Direction flips between repeats (Alt1, Alt2)
    Alternating,
}

impl CycleKind {
    /// Cycle kind of a channel state
    pub fn of(state: ChannelState) -> Self {
        match state {
            ChannelState::Idle => CycleKind::Idle,
            ChannelState::DrivingLeft | ChannelState::DrivingRight => CycleKind::Fixed,
            ChannelState::Alternating1 | ChannelState::Alternating2 => CycleKind::Alternating,
        }
    }
}

/// Speed the ramp is steered toward during a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedTarget {
    /// Standstill
    Zero,
    /// Configured maximum, in the phase's run direction
    Full,
}

/// What a phase turns into once its timer expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Expiry {
    /// Go to a fixed phase
    Advance(RunPhase),
    /// Run again (direction flipped if `flip`), or rest when the block is done
    Repeat { flip: bool },
    /// Phase never ends by itself
    Stay,
}

/// Effect of the expiry on the repeat counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterEffect {
    /// Left unchanged
    Keep,
    /// Reset to the state's repeat count
    Reload,
    /// Decremented when repeating, reset when entering the wait
    CountDown,
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub kind: CycleKind,
    pub phase: RunPhase,
    pub timer: PhaseTimer,
    pub target: SpeedTarget,
    pub on_expiry: Expiry,
    pub counter: CounterEffect,
}

const fn row(
    kind: CycleKind,
    phase: RunPhase,
    timer: PhaseTimer,
    target: SpeedTarget,
    on_expiry: Expiry,
    counter: CounterEffect,
) -> Transition {
    Transition {
        kind,
        phase,
        timer,
        target,
        on_expiry,
        counter,
    }
}

use CounterEffect::{CountDown, Keep, Reload};
use CycleKind::{Alternating, Fixed, Idle};
use PhaseTimer::{Hold, Immediate, Pause, Run, Wait};
use RunPhase::{Initializing, Pausing, RunningForward, RunningReverse, Waiting};
use SpeedTarget::{Full, Zero};

/// The complete transition table
pub static TABLE: [Transition; 15] = [
    // Idle: hold at zero whatever the phase
    row(Idle, Initializing, Hold, Zero, Expiry::Stay, Keep),
    row(Idle, RunningForward, Hold, Zero, Expiry::Stay, Keep),
    row(Idle, RunningReverse, Hold, Zero, Expiry::Stay, Keep),
    row(Idle, Pausing, Hold, Zero, Expiry::Stay, Keep),
    row(Idle, Waiting, Hold, Zero, Expiry::Stay, Keep),
    // Left / Right
    row(Fixed, Initializing, Immediate, Zero, Expiry::Advance(RunningForward), Reload),
    row(Fixed, RunningForward, Run, Full, Expiry::Advance(Pausing), Keep),
    row(Fixed, RunningReverse, Run, Full, Expiry::Advance(Pausing), Keep),
    row(Fixed, Pausing, Pause, Zero, Expiry::Repeat { flip: false }, CountDown),
    row(Fixed, Waiting, Wait, Zero, Expiry::Advance(RunningForward), Reload),
    // Alternating 1 / 2
    row(Alternating, Initializing, Immediate, Zero, Expiry::Advance(RunningForward), Reload),
    row(Alternating, RunningForward, Run, Full, Expiry::Advance(Pausing), Keep),
    row(Alternating, RunningReverse, Run, Full, Expiry::Advance(Pausing), Keep),
    row(Alternating, Pausing, Pause, Zero, Expiry::Repeat { flip: true }, CountDown),
    row(Alternating, Waiting, Wait, Zero, Expiry::Advance(RunningForward), Reload),
];

/// Row used if a lookup ever misses: hold still
const FALLBACK: Transition = row(Idle, Initializing, Hold, Zero, Expiry::Stay, Keep);

/// Look up the row for a channel state and phase
pub fn transition(state: ChannelState, phase: RunPhase) -> &'static Transition {
    let kind = CycleKind::of(state);
    TABLE
        .iter()
        .find(|t| t.kind == kind && t.phase == phase)
        .unwrap_or(&FALLBACK)
}
