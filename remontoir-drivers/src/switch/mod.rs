//! Selector switch drivers
//!
//! Each channel has a 5-position rotary selector wired as a resistor
//! ladder into one ADC input. [`SelectorDecoder`] classifies a raw
//! reading, [`Debouncer`] filters contact bounce, and [`LadderSelector`]
//! ties both channels together behind the core's
//! [`SwitchReader`](remontoir_core::traits::SwitchReader).

pub mod debounce;
pub mod selector;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_SAMPLES};
pub use selector::{LadderSelector, SelectorConfig, SelectorDecoder, ADC_FULL_SCALE};
