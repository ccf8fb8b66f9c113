//! Status snapshots
//!
//! Human-readable, one line per snapshot:
//!
//! ```text
//! left=right right=off test=off
//! ```

use core::fmt::{self, Write};

use heapless::String;

use crate::cycle::{ChannelStatus, TimingMode};
use crate::state::SwitchPosition;
use crate::traits::{ChannelId, Direction};

/// Capacity of a formatted status line
pub const STATUS_LINE_LEN: usize = 96;

/// Switch positions of both channels plus the timing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Left channel switch
    pub left: SwitchPosition,
    /// Right channel switch
    pub right: SwitchPosition,
    /// Timing mode in force
    pub mode: TimingMode,
}

impl StatusSnapshot {
    /// Switch position of one channel
    pub fn position(&self, channel: ChannelId) -> SwitchPosition {
        match channel {
            ChannelId::Left => self.left,
            ChannelId::Right => self.right,
        }
    }

    /// Check if test mode is on
    pub fn test_mode(&self) -> bool {
        self.mode.is_test()
    }

    /// Format into a fixed-capacity line (no terminator)
    pub fn to_line(&self) -> String<STATUS_LINE_LEN> {
        let mut line = String::new();
        // Longest possible line is well under the capacity
        let _ = write!(line, "{}", self);
        line
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left={} right={} test={}",
            self.left.label(),
            self.right.label(),
            if self.test_mode() { "on" } else { "off" }
        )
    }
}

/// Detailed status line for one channel
///
/// ```text
/// left: DrivingRight/RunningForward fwd speed=150 repeats=12 t=12300ms
/// ```
pub fn channel_line(channel: ChannelId, status: &ChannelStatus) -> String<STATUS_LINE_LEN> {
    let mut line = String::new();
    let dir = match status.direction {
        Direction::Forward => "fwd",
        Direction::Reverse => "rev",
    };
    let _ = write!(
        line,
        "{}: {:?}/{:?} {} speed={} repeats={} t={}ms",
        channel.as_str(),
        status.state,
        status.phase,
        dir,
        status.speed,
        status.repeats_remaining,
        status.phase_elapsed_ms
    );
    line
}
