//! Switch and channel state definitions
//!
//! The selector switch chooses a [`ChannelState`]; within each state the
//! cycle moves through [`RunPhase`]s. Transition logic lives in
//! [`crate::cycle`].

pub mod machine;

pub use machine::{ChannelState, RunPhase, SwitchPosition};
