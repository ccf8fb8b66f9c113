//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use remontoir_core::coordinator::StatusSnapshot;
use remontoir_core::cycle::{ChannelStatus, TimingMode};
use remontoir_core::traits::ChannelId;
use remontoir_protocol::Command;

/// Channel capacity for console commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outgoing status lines
const STATUS_CHANNEL_SIZE: usize = 8;

/// Parsed console commands, drained by the controller between ticks
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// One line of console output
#[derive(Debug, Clone, Copy, defmt::Format)]
pub enum Report {
    /// Switch positions and mode
    Snapshot(StatusSnapshot),
    /// Detail of one channel, sent after a snapshot on request
    Channel(ChannelId, ChannelStatus),
}

/// Reports waiting to be written to the console
pub static STATUS_CHANNEL: Channel<CriticalSectionRawMutex, Report, STATUS_CHANNEL_SIZE> =
    Channel::new();

/// Timing mode in force (updated by controller, read by indicator)
pub static MODE_SIGNAL: Signal<CriticalSectionRawMutex, TimingMode> = Signal::new();
