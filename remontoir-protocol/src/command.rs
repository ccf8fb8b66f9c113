//! Console commands

/// Commands accepted on the operator console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Run the full-length cycle (clears test mode)
    NormalMode,
    /// Compress all phase durations (sets test mode)
    TestMode,
    /// Print a status snapshot now
    Status,
}

/// Errors reported by the console parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Line did not match any known command
    UnknownCommand,
    /// Line exceeded the receive buffer; the rest of it is discarded
    LineTooLong,
}

impl Command {
    /// Parse a single trimmed word
    ///
    /// Matching ignores ASCII case. Both the full word and its
    /// single-character alias are accepted.
    pub fn parse(word: &[u8]) -> Result<Self, ConsoleError> {
        const TABLE: &[(&[u8], Command)] = &[
            (b"normal", Command::NormalMode),
            (b"n", Command::NormalMode),
            (b"test", Command::TestMode),
            (b"t", Command::TestMode),
            (b"status", Command::Status),
            (b"s", Command::Status),
            (b"?", Command::Status),
        ];

        TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|&(_, cmd)| cmd)
            .ok_or(ConsoleError::UnknownCommand)
    }

    /// Canonical spelling, used when echoing a command back
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::NormalMode => "normal",
            Command::TestMode => "test",
            Command::Status => "status",
        }
    }

    /// Check if this command changes the timing mode
    pub fn is_mode_change(&self) -> bool {
        matches!(self, Command::NormalMode | Command::TestMode)
    }
}
