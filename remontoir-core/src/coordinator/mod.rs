//! Dual-channel coordinator
//!
//! Owns both channel controllers and the timing mode. Each tick feeds
//! both channels the same mode, then reports if either switch moved.
//! No cycle logic lives here.

pub mod status;

pub use status::{channel_line, StatusSnapshot, STATUS_LINE_LEN};

use remontoir_protocol::Command;

use crate::config::WinderConfig;
use crate::cycle::{ChannelController, ChannelStatus, MotorCommand, TimingMode};
use crate::state::SwitchPosition;
use crate::traits::{ChannelId, MotorActuator, MotorError, StatusSink, SwitchReader};

/// Result of one coordinator tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Commands for the left and right channel
    pub commands: [MotorCommand; 2],
    /// Present when a switch position changed this tick
    pub snapshot: Option<StatusSnapshot>,
}

impl TickOutcome {
    /// Command for one channel
    pub fn command(&self, channel: ChannelId) -> MotorCommand {
        self.commands[channel.index()]
    }
}

/// Runs both channels in lockstep
#[derive(Debug, Clone)]
pub struct DualChannelCoordinator {
    channels: [ChannelController; 2],
    mode: TimingMode,
    /// Positions seen on the previous tick; `None` before the first tick
    last_positions: Option<[SwitchPosition; 2]>,
}

impl DualChannelCoordinator {
    /// Create a coordinator with both channels idle, in normal mode
    pub fn new(config: WinderConfig) -> Self {
        Self {
            channels: [ChannelController::new(config), ChannelController::new(config)],
            mode: TimingMode::Normal,
            last_positions: None,
        }
    }

    /// Timing mode in force
    pub fn mode(&self) -> TimingMode {
        self.mode
    }

    /// Change the timing mode; takes effect on the next tick
    pub fn set_mode(&mut self, mode: TimingMode) {
        self.mode = mode;
    }

    /// Controller of one channel
    pub fn channel(&self, channel: ChannelId) -> &ChannelController {
        &self.channels[channel.index()]
    }

    /// Status of one channel
    pub fn channel_status(&self, channel: ChannelId) -> ChannelStatus {
        self.channel(channel).status()
    }

    /// Current switch positions and mode
    pub fn snapshot(&self) -> StatusSnapshot {
        let [left, right] = self.last_positions.unwrap_or([SwitchPosition::Off; 2]);
        StatusSnapshot {
            left,
            right,
            mode: self.mode,
        }
    }

    /// Apply an operator command
    ///
    /// Every command answers with a snapshot so the operator sees the
    /// mode that is now in force.
    pub fn handle_command(&mut self, command: Command) -> StatusSnapshot {
        match command {
            Command::NormalMode => self.mode = TimingMode::Normal,
            Command::TestMode => self.mode = TimingMode::Test,
            Command::Status => {}
        }
        self.snapshot()
    }

    /// Advance both channels by one tick
    ///
    /// `positions` is `[left, right]`.
    pub fn tick(&mut self, positions: [SwitchPosition; 2], now_ms: u32) -> TickOutcome {
        let mode = self.mode;
        let commands = [
            self.channels[0].update(positions[0], now_ms, mode),
            self.channels[1].update(positions[1], now_ms, mode),
        ];

        let changed = self.last_positions != Some(positions);
        self.last_positions = Some(positions);

        TickOutcome {
            commands,
            snapshot: changed.then(|| self.snapshot()),
        }
    }

    /// Tick against hardware collaborators
    ///
    /// Polls `reader` for both channels, writes the commands to
    /// `actuators` (`[left, right]`) and forwards any snapshot to `sink`.
    /// Both channels are always processed; the first actuator error is
    /// returned afterwards.
    pub fn tick_with<R, A, S>(
        &mut self,
        reader: &mut R,
        actuators: &mut [A; 2],
        sink: &mut S,
        now_ms: u32,
    ) -> Result<TickOutcome, MotorError>
    where
        R: SwitchReader,
        A: MotorActuator,
        S: StatusSink,
    {
        let positions = ChannelId::ALL.map(|channel| reader.read(channel));
        let outcome = self.tick(positions, now_ms);

        let mut result = Ok(());
        for (actuator, command) in actuators.iter_mut().zip(outcome.commands) {
            let applied = apply(actuator, command);
            if result.is_ok() {
                result = applied;
            }
        }

        if let Some(snapshot) = &outcome.snapshot {
            sink.report(snapshot);
        }

        result.map(|()| outcome)
    }
}

/// Write one command to an actuator
///
/// Direction goes first and only when it differs. An actuator still
/// turning after an earlier failed write is stopped first; the new
/// direction and speed follow on a later tick once it reports standstill.
pub fn apply<A: MotorActuator>(
    actuator: &mut A,
    command: MotorCommand,
) -> Result<(), MotorError> {
    if actuator.direction() != command.direction {
        if !actuator.is_stopped() {
            return actuator.set_speed(0);
        }
        actuator.set_direction(command.direction)?;
    }
    if actuator.speed() != command.speed {
        actuator.set_speed(command.speed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChannelState;
    use crate::traits::Direction;

    /// Mock actuator enforcing the no-reversal-while-moving rule
    struct MockMotor {
        direction: Direction,
        speed: u8,
        direction_changes: u32,
        fail_speed: bool,
    }

    impl MockMotor {
        fn new() -> Self {
            Self {
                direction: Direction::Forward,
                speed: 0,
                direction_changes: 0,
                fail_speed: false,
            }
        }
    }

    impl MotorActuator for MockMotor {
        fn set_direction(&mut self, dir: Direction) -> Result<(), MotorError> {
            if self.speed != 0 && dir != self.direction {
                return Err(MotorError::DirectionWhileMoving);
            }
            self.direction = dir;
            self.direction_changes += 1;
            Ok(())
        }

        fn direction(&self) -> Direction {
            self.direction
        }

        fn set_speed(&mut self, speed: u8) -> Result<(), MotorError> {
            if self.fail_speed {
                return Err(MotorError::Pwm);
            }
            self.speed = speed;
            Ok(())
        }

        fn speed(&self) -> u8 {
            self.speed
        }
    }

    struct FixedReader([SwitchPosition; 2]);

    impl SwitchReader for FixedReader {
        fn read(&mut self, channel: ChannelId) -> SwitchPosition {
            self.0[channel.index()]
        }
    }

    #[derive(Default)]
    struct CountingSink {
        reports: u32,
        last: Option<StatusSnapshot>,
    }

    impl StatusSink for CountingSink {
        fn report(&mut self, snapshot: &StatusSnapshot) {
            self.reports += 1;
            self.last = Some(*snapshot);
        }
    }

    #[test]
    fn test_first_tick_reports() {
        let mut coord = DualChannelCoordinator::new(WinderConfig::default());
        let outcome = coord.tick([SwitchPosition::Off; 2], 0);
        assert_eq!(
            outcome.snapshot,
            Some(StatusSnapshot {
                left: SwitchPosition::Off,
                right: SwitchPosition::Off,
                mode: TimingMode::Normal,
            })
        );

        let outcome = coord.tick([SwitchPosition::Off; 2], 100);
        assert_eq!(outcome.snapshot, None);
    }

    #[test]
    fn test_reports_only_on_change() {
        let mut coord = DualChannelCoordinator::new(WinderConfig::default());
        coord.tick([SwitchPosition::Off; 2], 0);

        let outcome = coord.tick([SwitchPosition::Off, SwitchPosition::Alt1], 100);
        let snapshot = outcome.snapshot.unwrap();
        assert_eq!(snapshot.right, SwitchPosition::Alt1);

        for i in 2..50 {
            let outcome = coord.tick([SwitchPosition::Off, SwitchPosition::Alt1], i * 100);
            assert!(outcome.snapshot.is_none());
        }
    }

    #[test]
    fn test_channels_are_independent() {
        let mut coord = DualChannelCoordinator::new(WinderConfig::default());
        let positions = [SwitchPosition::Left, SwitchPosition::Off];
        for i in 0..20 {
            coord.tick(positions, i * 100);
        }
        assert_eq!(coord.channel(ChannelId::Left).state(), ChannelState::DrivingLeft);
        assert_eq!(coord.channel(ChannelId::Left).speed(), 150);
        assert_eq!(coord.channel(ChannelId::Right).state(), ChannelState::Idle);
        assert_eq!(coord.channel_status(ChannelId::Right).speed, 0);
    }

    #[test]
    fn test_commands_set_mode() {
        let mut coord = DualChannelCoordinator::new(WinderConfig::default());
        coord.tick([SwitchPosition::Right, SwitchPosition::Alt2], 0);

        let snapshot = coord.handle_command(Command::TestMode);
        assert!(snapshot.test_mode());
        assert_eq!(coord.mode(), TimingMode::Test);
        assert_eq!(snapshot.left, SwitchPosition::Right);

        let snapshot = coord.handle_command(Command::Status);
        assert!(snapshot.test_mode());

        let snapshot = coord.handle_command(Command::NormalMode);
        assert!(!snapshot.test_mode());
        assert_eq!(snapshot.right, SwitchPosition::Alt2);
    }

    #[test]
    fn test_mode_reaches_both_channels() {
        let mut coord = DualChannelCoordinator::new(WinderConfig::default());
        coord.set_mode(TimingMode::Test);
        let positions = [SwitchPosition::Right, SwitchPosition::Left];
        coord.tick(positions, 0);
        coord.tick(positions, 100);

        // 3 s test-mode run: both channels pause together
        let mut now = 200;
        while coord.channel(ChannelId::Left).phase().is_running() {
            coord.tick(positions, now);
            now += 100;
            assert!(now < 10_000);
        }
        assert!(!coord.channel(ChannelId::Right).phase().is_running());
    }

    #[test]
    fn test_tick_with_drives_actuators() {
        let mut coord = DualChannelCoordinator::new(WinderConfig::default());
        let mut reader = FixedReader([SwitchPosition::Right, SwitchPosition::Left]);
        let mut motors = [MockMotor::new(), MockMotor::new()];
        let mut sink = CountingSink::default();

        for i in 0..20 {
            coord.tick_with(&mut reader, &mut motors, &mut sink, i * 100).unwrap();
        }

        assert_eq!(motors[0].speed, 150);
        assert_eq!(motors[0].direction, Direction::Forward);
        assert_eq!(motors[1].speed, 150);
        assert_eq!(motors[1].direction, Direction::Reverse);
        assert_eq!(sink.reports, 1);

        // Flip left channel to Left: actuator sees ramp-down, then reversal
        reader.0[0] = SwitchPosition::Left;
        for i in 20..60 {
            coord.tick_with(&mut reader, &mut motors, &mut sink, i * 100).unwrap();
        }
        assert_eq!(motors[0].direction, Direction::Reverse);
        assert_eq!(motors[0].speed, 150);
        assert_eq!(motors[0].direction_changes, 1);
        assert_eq!(sink.reports, 2);
        assert_eq!(sink.last.unwrap().left, SwitchPosition::Left);
    }

    #[test]
    fn test_tick_with_reports_actuator_error() {
        let mut coord = DualChannelCoordinator::new(WinderConfig::default());
        let mut reader = FixedReader([SwitchPosition::Right, SwitchPosition::Right]);
        let mut motors = [MockMotor::new(), MockMotor::new()];
        motors[0].fail_speed = true;
        let mut sink = CountingSink::default();

        coord.tick_with(&mut reader, &mut motors, &mut sink, 0).unwrap();
        let result = coord.tick_with(&mut reader, &mut motors, &mut sink, 100);
        assert_eq!(result, Err(MotorError::Pwm));

        // The other channel was still driven
        assert_eq!(motors[1].speed, 10);
        // The cycle itself carried on
        assert_eq!(coord.channel(ChannelId::Left).speed(), 10);
    }

    #[test]
    fn test_actuator_recovers_after_failed_stop() {
        let mut coord = DualChannelCoordinator::new(WinderConfig::default());
        let mut reader = FixedReader([SwitchPosition::Right, SwitchPosition::Off]);
        let mut motors = [MockMotor::new(), MockMotor::new()];
        let mut sink = CountingSink::default();

        coord.tick_with(&mut reader, &mut motors, &mut sink, 0).unwrap();
        coord.tick_with(&mut reader, &mut motors, &mut sink, 100).unwrap();
        assert_eq!(motors[0].speed, 10);

        // The stop is lost on the ramp-down and adoption ticks
        reader.0[0] = SwitchPosition::Left;
        motors[0].fail_speed = true;
        for i in 2..4 {
            let result = coord.tick_with(&mut reader, &mut motors, &mut sink, i * 100);
            assert_eq!(result, Err(MotorError::Pwm));
        }
        assert_eq!(motors[0].speed, 10);
        assert_eq!(motors[0].direction, Direction::Forward);
        motors[0].fail_speed = false;

        // Actuator is stopped before it is turned around
        coord.tick_with(&mut reader, &mut motors, &mut sink, 400).unwrap();
        assert_eq!(motors[0].speed, 0);
        assert_eq!(motors[0].direction, Direction::Forward);

        for i in 5..40 {
            coord.tick_with(&mut reader, &mut motors, &mut sink, i * 100).unwrap();
        }
        let channel = coord.channel(ChannelId::Left);
        assert_eq!(channel.state(), ChannelState::DrivingLeft);
        assert_eq!(motors[0].direction, channel.direction());
        assert_eq!(motors[0].speed, channel.speed());
        assert_eq!(motors[0].speed, 150);
        assert_eq!(motors[0].direction_changes, 1);
    }

    #[test]
    fn test_apply_stops_moving_actuator_before_reversal() {
        let mut motor = MockMotor::new();
        motor.speed = 40;

        let command = MotorCommand {
            direction: Direction::Reverse,
            speed: 10,
        };
        apply(&mut motor, command).unwrap();
        assert_eq!(motor.speed, 0);
        assert_eq!(motor.direction, Direction::Forward);

        apply(&mut motor, command).unwrap();
        assert_eq!(motor.speed, 10);
        assert_eq!(motor.direction, Direction::Reverse);
    }

    #[test]
    fn test_apply_skips_unchanged_outputs() {
        let mut motor = MockMotor::new();
        apply(&mut motor, MotorCommand::stopped(Direction::Forward)).unwrap();
        assert_eq!(motor.direction_changes, 0);

        apply(&mut motor, MotorCommand::stopped(Direction::Reverse)).unwrap();
        assert_eq!(motor.direction_changes, 1);
    }
}
