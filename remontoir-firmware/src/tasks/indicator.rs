//! Status LED task
//!
//! Blinks the on-board LED: slow heartbeat in normal mode, fast in test
//! mode.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Ticker};

use remontoir_drivers::indicator::{BlinkPattern, StatusLed};

use crate::channels::MODE_SIGNAL;

/// LED refresh interval
const REFRESH_MS: u64 = 20;

/// Indicator task - drives the heartbeat LED
#[embassy_executor::task]
pub async fn indicator_task(pin: Output<'static>) {
    info!("Indicator task started");

    let Ok(mut led) = StatusLed::new(pin, BlinkPattern::NORMAL);
    let mut ticker = Ticker::every(Duration::from_millis(REFRESH_MS));

    loop {
        if let Some(mode) = MODE_SIGNAL.try_take() {
            debug!("LED pattern for {:?}", mode);
            led.set_pattern(BlinkPattern::for_mode(mode));
        }

        let now_ms = Instant::now().as_millis() as u32;
        let Ok(()) = led.update(now_ms);

        ticker.next().await;
    }
}
