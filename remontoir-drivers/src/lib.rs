//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in remontoir-core on top of `embedded-hal` 1.0:
//!
//! - Motor actuator (PWM speed, GPIO direction)
//! - Selector switch (resistor-ladder ADC decoding with debounce)
//! - Status indicator (heartbeat LED)

#![no_std]
#![deny(unsafe_code)]

pub mod indicator;
pub mod motor;
pub mod switch;
