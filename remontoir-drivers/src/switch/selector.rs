//! Resistor-ladder selector decoding
//!
//! Each selector position taps a different point of a resistor divider,
//! so the ADC reading sits near one nominal centre per position. Readings
//! between windows (wiper in transit, broken wire) decode to Off.

use remontoir_core::state::SwitchPosition;
use remontoir_core::traits::{ChannelId, SwitchReader};

use super::debounce::Debouncer;

/// Full-scale reading of the 12-bit ADC
pub const ADC_FULL_SCALE: u16 = 4095;

/// Ladder calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelectorConfig {
    /// Nominal reading per position, in [`SwitchPosition::ALL`] order
    pub centres: [u16; 5],
    /// Accepted distance from a centre
    pub tolerance: u16,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        // Equal resistors: Off at ground, Alt2 at the rail
        Self {
            centres: [0, 1024, 2048, 3072, ADC_FULL_SCALE],
            tolerance: 256,
        }
    }
}

/// Maps raw ADC readings to switch positions
#[derive(Debug, Clone)]
pub struct SelectorDecoder {
    config: SelectorConfig,
}

impl SelectorDecoder {
    /// Create a decoder
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Classify one reading
    pub fn decode(&self, raw: u16) -> SwitchPosition {
        SwitchPosition::ALL
            .iter()
            .zip(self.config.centres)
            .find(|(_, centre)| raw.abs_diff(*centre) <= self.config.tolerance)
            .map(|(position, _)| *position)
            .unwrap_or(SwitchPosition::Off)
    }
}

/// Both channel selectors, decoded and debounced
///
/// The firmware feeds raw samples with [`LadderSelector::sample`]; the
/// coordinator reads the accepted positions through [`SwitchReader`].
#[derive(Debug, Clone)]
pub struct LadderSelector {
    decoder: SelectorDecoder,
    debouncers: [Debouncer; 2],
}

impl LadderSelector {
    /// Create a selector pair with `samples`-deep debouncing
    pub fn new(config: SelectorConfig, samples: u8) -> Self {
        Self {
            decoder: SelectorDecoder::new(config),
            debouncers: [Debouncer::new(samples), Debouncer::new(samples)],
        }
    }

    /// Feed one raw reading, returns the accepted position
    pub fn sample(&mut self, channel: ChannelId, raw: u16) -> SwitchPosition {
        let position = self.decoder.decode(raw);
        self.debouncers[channel.index()].update(position)
    }

    /// Accepted position of one channel
    pub fn position(&self, channel: ChannelId) -> SwitchPosition {
        self.debouncers[channel.index()].position()
    }
}

impl SwitchReader for LadderSelector {
    fn read(&mut self, channel: ChannelId) -> SwitchPosition {
        self.position(channel)
    }
}
