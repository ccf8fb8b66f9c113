//! Status indicator drivers

pub mod blink;

pub use blink::{BlinkPattern, StatusLed};
