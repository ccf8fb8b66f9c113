//! Board definition
//!
//! Pin map for a Raspberry Pi Pico carrying two H-bridge drivers, two
//! resistor-ladder selectors and a console UART:
//!
//! | Function              | GPIO | Peripheral       |
//! |-----------------------|------|------------------|
//! | Console TX / RX       | 0/1  | UART0            |
//! | Left motor PWM        | 16   | PWM slice 0 A    |
//! | Left motor direction  | 18   | GPIO             |
//! | Right motor PWM       | 20   | PWM slice 2 A    |
//! | Right motor direction | 21   | GPIO             |
//! | Status LED            | 25   | GPIO (on-board)  |
//! | Left selector         | 26   | ADC0             |
//! | Right selector        | 27   | ADC1             |
//!
//! Everything here is compiled in; nothing is read from flash.

use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_rp::uart::Config as UartConfig;

use remontoir_core::config::WinderConfig;
use remontoir_drivers::motor::{PwmMotor, PwmMotorConfig};
use remontoir_drivers::switch::{SelectorConfig, DEFAULT_DEBOUNCE_SAMPLES};

/// Motor actuator type of one channel
pub type ChannelMotor = PwmMotor<PwmOutput<'static>, Output<'static>>;

/// PWM counter top; 125 MHz / 62500 = 2 kHz
pub const PWM_TOP: u16 = 62_500;

/// Console baud rate
pub const CONSOLE_BAUD: u32 = 115_200;

/// Console transmit buffer size
pub const CONSOLE_TX_BUF: usize = 256;

/// Console receive buffer size
pub const CONSOLE_RX_BUF: usize = 64;

/// Winder configuration
pub fn winder_config() -> WinderConfig {
    WinderConfig::default()
}

/// Motor driver configuration
///
/// The right pair is mounted mirrored, so its direction line is inverted
/// to make Forward turn both trays the same way.
pub fn motor_config(inverted: bool) -> PwmMotorConfig {
    PwmMotorConfig {
        max_speed: winder_config().max_speed,
        min_duty_percent: 20,
        direction_inverted: inverted,
    }
}

/// Selector ladder calibration
pub fn selector_config() -> SelectorConfig {
    SelectorConfig::default()
}

/// Debounce depth, in controller ticks
pub fn debounce_samples() -> u8 {
    DEFAULT_DEBOUNCE_SAMPLES
}

/// Console UART configuration
pub fn console_uart_config() -> UartConfig {
    let mut config = UartConfig::default();
    config.baudrate = CONSOLE_BAUD;
    config
}
