//! Remontoir - Dual-Channel Watch Winder Firmware
//!
//! Main firmware binary for RP2040-based winders. Two motor channels, each
//! with its own 5-position selector, run independent winding cycles; a
//! serial console switches between normal and test timing.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use remontoir_drivers::motor::PwmMotor;

use crate::board::{ChannelMotor, CONSOLE_RX_BUF, CONSOLE_TX_BUF, PWM_TOP};

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; CONSOLE_TX_BUF]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; CONSOLE_RX_BUF]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Remontoir firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Console UART
    let tx_buf = TX_BUF.init([0u8; CONSOLE_TX_BUF]);
    let rx_buf = RX_BUF.init([0u8; CONSOLE_RX_BUF]);
    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        tx_buf,
        rx_buf,
        board::console_uart_config(),
    );
    let (tx, rx) = uart.split();
    info!("Console UART initialized");

    // Motor outputs, started at 0 % duty
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;

    let left_pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config.clone());
    let right_pwm = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_20, pwm_config);
    let (Some(left_out), _) = left_pwm.split() else {
        defmt::panic!("Left PWM output unavailable");
    };
    let (Some(right_out), _) = right_pwm.split() else {
        defmt::panic!("Right PWM output unavailable");
    };

    let left_dir = Output::new(p.PIN_18, Level::Low);
    let right_dir = Output::new(p.PIN_21, Level::Low);

    let motors: [ChannelMotor; 2] = [
        unwrap!(PwmMotor::new(left_out, Some(left_dir), board::motor_config(false))),
        unwrap!(PwmMotor::new(right_out, Some(right_dir), board::motor_config(true))),
    ];
    info!("Motor outputs initialized");

    // Selector ladders
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let selectors = [
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
    ];
    info!("ADC initialized");

    // Status LED
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::console_task(tx, rx)).unwrap();
    spawner.spawn(tasks::indicator_task(led)).unwrap();
    spawner
        .spawn(tasks::controller_task(adc, selectors, motors))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
