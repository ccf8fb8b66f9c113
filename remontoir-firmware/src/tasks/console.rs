//! Serial console task
//!
//! Parses operator commands from the UART and writes status reports back.
//! One line in, one or more lines out:
//!
//! ```text
//! > t
//! left=alt1 right=off test=on
//! > bogus
//! error: unknown command
//! ```

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};
use heapless::String;

use remontoir_core::coordinator::{channel_line, STATUS_LINE_LEN};
use remontoir_protocol::{ConsoleError, LineParser};

use crate::channels::{Report, COMMAND_CHANNEL, STATUS_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Console task - command parsing and status output
#[embassy_executor::task]
pub async fn console_task(mut tx: BufferedUartTx, mut rx: BufferedUartRx) {
    info!("Console task started");

    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match select(rx.read(&mut buf), STATUS_CHANNEL.receive()).await {
            Either::First(Ok(n)) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(command)) => {
                            // Drop rather than stall the console
                            if COMMAND_CHANNEL.try_send(command).is_err() {
                                warn!("Command channel full, dropping {}", command.as_str());
                            }
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            debug!("Console error: {:?}", e);
                            write_line(&mut tx, error_text(e)).await;
                        }
                    }
                }
            }
            Either::First(Ok(_)) => {
                // No bytes read, continue
            }
            Either::First(Err(e)) => {
                warn!("UART read error: {:?}", e);
            }
            Either::Second(report) => {
                let line: String<STATUS_LINE_LEN> = match report {
                    Report::Snapshot(snapshot) => snapshot.to_line(),
                    Report::Channel(channel, status) => channel_line(channel, &status),
                };
                write_line(&mut tx, &line).await;
            }
        }
    }
}

/// Operator-facing text for a parse error
fn error_text(error: ConsoleError) -> &'static str {
    match error {
        ConsoleError::UnknownCommand => "error: unknown command",
        ConsoleError::LineTooLong => "error: line too long",
    }
}

/// Write one CRLF-terminated line
async fn write_line(tx: &mut BufferedUartTx, line: &str) {
    let result = async {
        tx.write_all(line.as_bytes()).await?;
        tx.write_all(b"\r\n").await
    }
    .await;

    if let Err(e) = result {
        warn!("UART write error: {:?}", e);
    }
}
