//! Bridge-side half of the WiFi bridge protocol, host-testable.
//!
//! The dispatcher in [`bridge`] implements the line protocol against any
//! [`radio::WifiRadio`]; [`simulate::SimulatedRadio`] stands in for the
//! hardware so the whole protocol can run and be tested off-device. The
//! `bridge-sim` binary serves the protocol over a serial device, which makes
//! a pty pair a drop-in substitute for a flashed module.

use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

pub mod bridge;
pub mod radio;
pub mod settings;
pub mod simulate;

pub use bridge::{Bridge, LineBuffer, LinkState};
pub use radio::WifiRadio;
pub use settings::Settings;
pub use simulate::{SimulatedNetwork, SimulatedRadio};

/// Pause per loop iteration, mirroring the cooperative firmware loop.
const IDLE_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum FirmwareError {
    #[error("serial error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Serves the bridge protocol over the configured serial device until the
/// port fails.
///
/// One cooperative loop: drain UART bytes into lines, dispatch each line
/// synchronously, then poll the TCP session for unsolicited inbound data.
/// Command handling and data forwarding interleave at line granularity.
pub fn run(settings: &Settings) -> Result<(), FirmwareError> {
    let mut port = serialport::new(&settings.uart.port_path, settings.uart.baud_rate)
        .timeout(Duration::from_millis(10))
        .open()?;

    tracing::info!("serving bridge on {}", settings.uart.port_path);

    let radio = SimulatedRadio::new(settings.radio.networks.clone())
        .with_ip(&settings.radio.ip)
        .with_echo(settings.radio.echo);
    let mut bridge = Bridge::new(radio);

    for line in bridge.banner() {
        writeln!(port, "{line}")?;
    }

    let mut buffer = LineBuffer::new();
    let mut scratch = [0u8; 256];

    loop {
        match port.read(&mut scratch) {
            Ok(0) => {}
            Ok(read) => {
                for line in buffer.push_bytes(&scratch[..read]) {
                    for response in bridge.handle_line(&line) {
                        writeln!(port, "{response}")?;
                    }
                }
            }
            Err(err) if err.kind() == io::ErrorKind::TimedOut => {}
            Err(err) => return Err(err.into()),
        }

        if let Some(data) = bridge.poll_tcp() {
            writeln!(port, "{data}")?;
        }

        thread::sleep(IDLE_DELAY);
    }
}
