//! Board-agnostic core logic for the watch winder firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motor actuator, switch reader, status sink)
//! - Switch/channel state definitions
//! - Per-channel winding cycle state machine and its timing table
//! - Speed ramp with the direction-reversal guard
//! - Dual-channel coordinator
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod coordinator;
pub mod cycle;
pub mod state;
pub mod traits;
