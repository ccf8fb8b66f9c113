//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware compiles the
//! defaults in; nothing is persisted.

pub mod types;

pub use types::*;
