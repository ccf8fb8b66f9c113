//! Operator console protocol
//!
//! The winder exposes a plain-text serial console with three commands.
//! One command per line, case-insensitive:
//!
//! ```text
//! normal | n       clear test mode, run the full-length cycle
//! test   | t       compress every phase duration for observation
//! status | s | ?   print the current switch positions and mode
//! ```
//!
//! Bytes are fed one at a time into a [`LineParser`], which yields a
//! [`Command`] at every line end. The console is write-only from the
//! winder's point of view apart from status lines; there is no
//! request/response framing.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{Command, ConsoleError};
pub use line::{LineParser, MAX_LINE_LEN};
