//! Phase clock
//!
//! Measures time since the current phase started against the scheduler's
//! millisecond uptime. A reading earlier than the phase start (counter
//! wraparound after ~49 days, or a clock reset) re-baselines the phase to
//! the current time: the phase restarts instead of ending early.

/// Elapsed-time tracker for one phase
#[derive(Debug, Clone)]
pub struct PhaseClock {
    start_ms: u32,
    resyncs: u32,
}

impl PhaseClock {
    /// Start a clock at `now_ms`
    pub fn new(now_ms: u32) -> Self {
        Self {
            start_ms: now_ms,
            resyncs: 0,
        }
    }

    /// Begin a new phase at `now_ms`
    pub fn restart(&mut self, now_ms: u32) {
        self.start_ms = now_ms;
    }

    /// Time at which the current phase started
    pub fn start_ms(&self) -> u32 {
        self.start_ms
    }

    /// Milliseconds since the phase started, never negative
    pub fn elapsed(&mut self, now_ms: u32) -> u32 {
        match now_ms.checked_sub(self.start_ms) {
            Some(elapsed) => elapsed,
            None => {
                self.start_ms = now_ms;
                self.resyncs = self.resyncs.saturating_add(1);
                0
            }
        }
    }

    /// Number of times the clock went backward and was re-baselined
    pub fn resyncs(&self) -> u32 {
        self.resyncs
    }
}
