//! Main controller task
//!
//! Owns the coordinator and the hardware it drives. Console commands are
//! applied as they arrive; every tick samples both selectors, advances
//! both channels and writes the motor outputs.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::adc::{Adc, Async, Channel};

use remontoir_core::coordinator::{DualChannelCoordinator, StatusSnapshot};
use remontoir_core::state::ChannelState;
use remontoir_core::traits::{ChannelId, StatusSink};
use remontoir_drivers::switch::LadderSelector;
use remontoir_protocol::Command;

use crate::board::{self, ChannelMotor};
use crate::channels::{Report, COMMAND_CHANNEL, MODE_SIGNAL, STATUS_CHANNEL};
use crate::tasks::tick::TICK_SIGNAL;

/// Forwards snapshots to the console, dropping them if it falls behind
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn report(&mut self, snapshot: &StatusSnapshot) {
        debug!("Switches: {}", snapshot);
        send_report(Report::Snapshot(*snapshot));
    }
}

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(
    mut adc: Adc<'static, Async>,
    mut selector_pins: [Channel<'static>; 2],
    mut motors: [ChannelMotor; 2],
) {
    info!("Controller task started");

    let config = board::winder_config();
    if let Err(e) = config.validate() {
        error!("Invalid winder config: {:?}", e);
    }

    let mut coordinator = DualChannelCoordinator::new(config);
    let mut selector = LadderSelector::new(board::selector_config(), board::debounce_samples());
    let mut sink = ConsoleSink;

    MODE_SIGNAL.signal(coordinator.mode());

    loop {
        match select(COMMAND_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(command) => {
                debug!("Command: {}", command.as_str());
                let snapshot = coordinator.handle_command(command);
                if command.is_mode_change() {
                    info!("Timing mode: {:?}", snapshot.mode);
                    MODE_SIGNAL.signal(snapshot.mode);
                }
                send_report(Report::Snapshot(snapshot));

                if command == Command::Status {
                    for channel in ChannelId::ALL {
                        let status = coordinator.channel_status(channel);
                        send_report(Report::Channel(channel, status));
                    }
                }
            }
            Either::Second(now_ms) => {
                for channel in ChannelId::ALL {
                    match adc.read(&mut selector_pins[channel.index()]).await {
                        Ok(raw) => {
                            selector.sample(channel, raw);
                        }
                        Err(e) => {
                            warn!("{} selector read failed: {:?}", channel.as_str(), e);
                        }
                    }
                }

                let before = ChannelId::ALL.map(|channel| coordinator.channel(channel).state());

                match coordinator.tick_with(&mut selector, &mut motors, &mut sink, now_ms) {
                    Ok(outcome) => {
                        trace!("Tick {}: {:?}", now_ms, outcome.commands);
                    }
                    Err(e) => {
                        warn!("Motor output failed: {:?}", e);
                    }
                }

                for channel in ChannelId::ALL {
                    log_adoption(channel, before[channel.index()], &coordinator);
                }
            }
        }
    }
}

/// Log a channel switching to a new state
fn log_adoption(channel: ChannelId, before: ChannelState, coordinator: &DualChannelCoordinator) {
    let state = coordinator.channel(channel).state();
    if state != before {
        info!("{} channel: {:?} -> {:?}", channel.as_str(), before, state);
    }
}

/// Queue a report for the console, dropping it if the queue is full
fn send_report(report: Report) {
    if STATUS_CHANNEL.try_send(report).is_err() {
        warn!("Status channel full, dropping report");
    }
}
