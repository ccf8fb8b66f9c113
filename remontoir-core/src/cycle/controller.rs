//! Channel controller
//!
//! Owns the cycle state of one motor channel and turns
//! (switch position, time, timing mode) into a [`MotorCommand`] every tick.
//!
//! Two layers of transitions:
//!
//! - **State change**: the switch no longer matches the accepted
//!   [`ChannelState`]. The ramp is brought to zero first, one step per
//!   tick; the new state is adopted only at standstill, starting over in
//!   [`RunPhase::Initializing`] with a fresh repeat counter.
//! - **Phase cycling**: within a state, the row from the transition
//!   [table](super::table) decides the speed target and what happens when
//!   the phase timer runs out.
//!
//! The pause dwell is counted from the tick the motor reaches standstill,
//! so a run never starts (or reverses) while the previous one is still
//! coasting down.

use super::clock::PhaseClock;
use super::ramp::{MotorCommand, SpeedRamp};
use super::table::{transition, CounterEffect, Expiry, SpeedTarget};
use super::timing::{phase_deadline, TimingMode};
use crate::config::WinderConfig;
use crate::state::{ChannelState, RunPhase, SwitchPosition};
use crate::traits::Direction;

/// Read-only view of a channel for status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelStatus {
    /// Last observed switch position
    pub position: SwitchPosition,
    /// Accepted state
    pub state: ChannelState,
    /// Phase within the state
    pub phase: RunPhase,
    /// Commanded direction
    pub direction: Direction,
    /// Commanded speed
    pub speed: u8,
    /// Run/Pause pairs left in this block, including the current one
    pub repeats_remaining: u8,
    /// Time spent in the current phase as of the last update
    pub phase_elapsed_ms: u32,
}

impl ChannelStatus {
    /// Check if the channel is ramping down to switch state
    pub fn is_changing_state(&self) -> bool {
        ChannelState::from_switch(self.position) != self.state
    }
}

/// Cycle state machine for one motor channel
#[derive(Debug, Clone)]
pub struct ChannelController {
    config: WinderConfig,
    state: ChannelState,
    phase: RunPhase,
    /// Run/Pause pairs left in the block, including the current one
    repeats: u8,
    /// Direction of the most recent running phase
    run_direction: Direction,
    clock: PhaseClock,
    ramp: SpeedRamp,
    position: SwitchPosition,
    phase_elapsed_ms: u32,
}

impl ChannelController {
    /// Create an idle controller
    pub fn new(config: WinderConfig) -> Self {
        Self {
            config,
            state: ChannelState::Idle,
            phase: RunPhase::Initializing,
            repeats: 0,
            run_direction: Direction::Forward,
            clock: PhaseClock::new(0),
            ramp: SpeedRamp::new(config.max_speed, config.ramp_step),
            position: SwitchPosition::Off,
            phase_elapsed_ms: 0,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &WinderConfig {
        &self.config
    }

    /// Accepted channel state
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Current run phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Current commanded speed
    pub fn speed(&self) -> u8 {
        self.ramp.speed()
    }

    /// Current commanded direction
    pub fn direction(&self) -> Direction {
        self.ramp.direction()
    }

    /// Run/Pause pairs left in the current block
    pub fn repeats_remaining(&self) -> u8 {
        self.repeats
    }

    /// Times the phase clock had to be re-baselined
    pub fn clock_resyncs(&self) -> u32 {
        self.clock.resyncs()
    }

    /// Snapshot for reporting
    pub fn status(&self) -> ChannelStatus {
        ChannelStatus {
            position: self.position,
            state: self.state,
            phase: self.phase,
            direction: self.ramp.direction(),
            speed: self.ramp.speed(),
            repeats_remaining: self.repeats,
            phase_elapsed_ms: self.phase_elapsed_ms,
        }
    }

    /// Advance the channel by one scheduler tick
    ///
    /// `now_ms` is the scheduler's uptime; `mode` is the timing mode in
    /// force for this tick.
    pub fn update(
        &mut self,
        position: SwitchPosition,
        now_ms: u32,
        mode: TimingMode,
    ) -> MotorCommand {
        self.position = position;

        let requested = ChannelState::from_switch(position);
        if requested != self.state {
            if !self.ramp.is_stopped() {
                self.phase_elapsed_ms = self.clock.elapsed(now_ms);
                return self.ramp.ramp_down();
            }
            self.adopt(requested, now_ms);
            return self.ramp.command();
        }

        self.advance_phase(now_ms, mode);
        self.drive()
    }

    /// Accept a new state at standstill
    fn adopt(&mut self, state: ChannelState, now_ms: u32) {
        self.state = state;
        self.phase = RunPhase::Initializing;
        self.repeats = state.repeat_count();
        self.run_direction = state.base_direction();
        self.clock.restart(now_ms);
        self.phase_elapsed_ms = 0;
    }

    /// Check the phase timer and take the row's expiry transition
    fn advance_phase(&mut self, now_ms: u32, mode: TimingMode) {
        // Pause dwell starts at standstill
        if self.phase == RunPhase::Pausing && !self.ramp.is_stopped() {
            self.clock.restart(now_ms);
        }

        let row = transition(self.state, self.phase);
        let elapsed = self.clock.elapsed(now_ms);
        self.phase_elapsed_ms = elapsed;

        let deadline = phase_deadline(&self.config.timing, self.state, row.timer, mode);
        if !deadline.is_expired(elapsed) {
            return;
        }

        let base = self.state.base_direction();
        let next = match row.on_expiry {
            Expiry::Stay => return,
            Expiry::Advance(phase) => phase,
            Expiry::Repeat { .. } if self.repeats <= 1 => RunPhase::Waiting,
            Expiry::Repeat { flip } => {
                let dir = if flip {
                    self.run_direction.opposite()
                } else {
                    self.run_direction
                };
                RunPhase::running_toward(dir, base)
            }
        };

        match row.counter {
            CounterEffect::Keep => {}
            CounterEffect::Reload => self.repeats = self.state.repeat_count(),
            CounterEffect::CountDown if next == RunPhase::Waiting => {
                self.repeats = self.state.repeat_count();
            }
            CounterEffect::CountDown => self.repeats = self.repeats.saturating_sub(1),
        }

        if let Some(dir) = next.run_direction(base) {
            self.run_direction = dir;
        }
        self.phase = next;
        self.clock.restart(now_ms);
        self.phase_elapsed_ms = 0;
    }

    /// Step the ramp toward the current row's target
    fn drive(&mut self) -> MotorCommand {
        let row = transition(self.state, self.phase);
        match row.target {
            SpeedTarget::Full => {
                let dir = self
                    .phase
                    .run_direction(self.state.base_direction())
                    .unwrap_or(self.run_direction);
                self.ramp.step_toward(dir, self.config.max_speed)
            }
            SpeedTarget::Zero => self.ramp.ramp_down(),
        }
    }
}
