//! Selector switch trait

use crate::state::SwitchPosition;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies one of the two independently switched motor channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChannelId {
    /// Left tray pair
    Left,
    /// Right tray pair
    Right,
}

impl ChannelId {
    /// Both channels, in tick order
    pub const ALL: [ChannelId; 2] = [ChannelId::Left, ChannelId::Right];

    /// Array index for per-channel storage
    pub fn index(self) -> usize {
        match self {
            ChannelId::Left => 0,
            ChannelId::Right => 1,
        }
    }

    /// Short label for status output
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelId::Left => "left",
            ChannelId::Right => "right",
        }
    }
}

/// Source of selector switch positions
///
/// Sampling, thresholds and debounce are the implementation's business.
/// Readings that cannot be classified must be reported as
/// [`SwitchPosition::Off`].
pub trait SwitchReader {
    /// Read the current position for a channel
    fn read(&mut self, channel: ChannelId) -> SwitchPosition;
}
