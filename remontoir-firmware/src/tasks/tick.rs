//! Tick task
//!
//! Paces the winding cycle: every tick the controller samples the
//! selectors and advances both channels.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

use remontoir_core::config::TICK_INTERVAL_MS;

use crate::board;

/// Signal to notify controller of tick, carrying uptime in ms
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let config = board::winder_config();
    let tick_ms = match config.validate() {
        Ok(()) => config.tick_ms,
        Err(e) => {
            warn!("Invalid winder config ({:?}), ticking every {} ms", e, TICK_INTERVAL_MS);
            TICK_INTERVAL_MS
        }
    };
    info!("Tick period: {} ms", tick_ms);

    let mut ticker = Ticker::every(Duration::from_millis(tick_ms as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;

        // Wraps after ~49 days; the cycle clock resyncs on wrap
        let now_ms = start.elapsed().as_millis() as u32;

        TICK_SIGNAL.signal(now_ms);
    }
}
