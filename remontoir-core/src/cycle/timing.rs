//! Phase durations
//!
//! Duration lookup is a pure function of the timing table, the channel
//! state, the phase timer and the [`TimingMode`] passed in for the
//! current tick.

use crate::config::TimingTable;
use crate::state::ChannelState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Duration scaling applied to every phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimingMode {
    /// Full-length cycle
    #[default]
    Normal,
    /// Every duration divided by its test factor
    Test,
}

impl TimingMode {
    /// Check if durations are compressed
    pub fn is_test(self) -> bool {
        self == TimingMode::Test
    }
}

/// Which duration governs a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseTimer {
    /// Expires on the first tick
    Immediate,
    /// Run duration
    Run,
    /// Pause dwell
    Pause,
    /// Long wait, length depends on the channel state
    Wait,
    /// Never expires
    Hold,
}

/// When a phase ends, relative to its start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deadline {
    /// At the next evaluation
    Immediate,
    /// Once more than this many milliseconds have elapsed
    After(u32),
    /// Not at all
    Never,
}

impl Deadline {
    /// Check if a phase that has run for `elapsed_ms` is over
    pub fn is_expired(self, elapsed_ms: u32) -> bool {
        match self {
            Deadline::Immediate => true,
            Deadline::After(duration_ms) => elapsed_ms > duration_ms,
            Deadline::Never => false,
        }
    }
}

/// Look up the deadline of a phase
pub fn phase_deadline(
    table: &TimingTable,
    state: ChannelState,
    timer: PhaseTimer,
    mode: TimingMode,
) -> Deadline {
    let (normal_ms, factor) = match timer {
        PhaseTimer::Immediate => return Deadline::Immediate,
        PhaseTimer::Hold => return Deadline::Never,
        PhaseTimer::Run => (table.run_ms, table.run_test_factor),
        PhaseTimer::Pause => (table.pause_ms, table.pause_test_factor),
        PhaseTimer::Wait => {
            let wait_ms = if state == ChannelState::Alternating2 {
                table.wait_long_ms
            } else {
                table.wait_ms
            };
            (wait_ms, table.wait_test_factor)
        }
    };

    match mode {
        TimingMode::Normal => Deadline::After(normal_ms),
        TimingMode::Test => Deadline::After(normal_ms / factor.max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(table: &TimingTable, state: ChannelState, timer: PhaseTimer, mode: TimingMode) -> u32 {
        match phase_deadline(table, state, timer, mode) {
            Deadline::After(ms) => ms,
            other => panic!("expected a timed deadline, got {:?}", other),
        }
    }

    #[test]
    fn test_normal_durations() {
        let t = TimingTable::default();
        let n = TimingMode::Normal;
        assert_eq!(after(&t, ChannelState::DrivingRight, PhaseTimer::Run, n), 30_000);
        assert_eq!(after(&t, ChannelState::DrivingRight, PhaseTimer::Pause, n), 30_000);
        assert_eq!(after(&t, ChannelState::DrivingLeft, PhaseTimer::Wait, n), 18 * 60_000);
        assert_eq!(after(&t, ChannelState::Alternating1, PhaseTimer::Wait, n), 18 * 60_000);
        assert_eq!(after(&t, ChannelState::Alternating2, PhaseTimer::Wait, n), 27 * 60_000);
    }

    #[test]
    fn test_test_mode_factors() {
        let t = TimingTable::default();
        let m = TimingMode::Test;
        assert_eq!(after(&t, ChannelState::DrivingRight, PhaseTimer::Run, m), 3_000);
        assert_eq!(after(&t, ChannelState::DrivingRight, PhaseTimer::Pause, m), 3_000);
        assert_eq!(after(&t, ChannelState::DrivingRight, PhaseTimer::Wait, m), 27_000);
        assert_eq!(after(&t, ChannelState::Alternating2, PhaseTimer::Wait, m), 40_500);
    }

    #[test]
    fn test_untimed_deadlines() {
        let t = TimingTable::default();
        for mode in [TimingMode::Normal, TimingMode::Test] {
            assert_eq!(
                phase_deadline(&t, ChannelState::Idle, PhaseTimer::Hold, mode),
                Deadline::Never
            );
            assert_eq!(
                phase_deadline(&t, ChannelState::DrivingLeft, PhaseTimer::Immediate, mode),
                Deadline::Immediate
            );
        }
    }

    #[test]
    fn test_expiry_is_strict() {
        assert!(!Deadline::After(100).is_expired(100));
        assert!(Deadline::After(100).is_expired(101));
        assert!(Deadline::Immediate.is_expired(0));
        assert!(!Deadline::Never.is_expired(u32::MAX));
    }

    #[test]
    fn test_zero_factor_does_not_divide_by_zero() {
        let t = TimingTable {
            run_test_factor: 0,
            ..TimingTable::default()
        };
        assert_eq!(
            after(&t, ChannelState::DrivingRight, PhaseTimer::Run, TimingMode::Test),
            30_000
        );
    }
}
