//! Line assembly for the console
//!
//! The UART delivers bytes in arbitrary chunks. [`LineParser`] collects
//! them until CR or LF and parses the finished line into a [`Command`].

use heapless::Vec;

use crate::command::{Command, ConsoleError};

/// Longest accepted line, excluding the terminator
pub const MAX_LINE_LEN: usize = 32;

/// Byte-fed line parser
///
/// Leading and trailing blanks are ignored, as are empty lines, so CRLF
/// terminals and stray newlines produce no errors.
#[derive(Debug, Clone)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Current line overflowed; discard until the next terminator
    overflowed: bool,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a new line parser
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(cmd))` at the end of a line holding a valid
    /// command, `Ok(None)` while a line is still being received (or for
    /// blank lines) and `Err` for unknown or over-long lines.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Command>, ConsoleError> {
        if byte == b'\r' || byte == b'\n' {
            return self.finish_line();
        }

        if self.overflowed {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
        Ok(None)
    }

    fn finish_line(&mut self) -> Result<Option<Command>, ConsoleError> {
        if self.overflowed {
            self.reset();
            return Err(ConsoleError::LineTooLong);
        }

        let result = match trim(&self.buffer) {
            [] => Ok(None),
            word => Command::parse(word).map(Some),
        };
        self.buffer.clear();
        result
    }
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
