use std::thread;
use std::time::{Duration, Instant};

use espbridge_proto::{Command, NetworkRecord, WifiStatus};

use crate::error::ClientError;
use crate::settings::{Settings, Timing};
use crate::transport::{SerialTransport, Transport};

/// Synchronous client for the WiFi bridge.
///
/// One instance owns one serial channel and supports one outstanding command
/// at a time; concurrent callers need external mutual exclusion. There is no
/// way to abort an in-flight bridge operation - once a command is written,
/// the only failure detection is waiting out the polling window.
pub struct BridgeClient<T = SerialTransport> {
    transport: T,
    timing: Timing,
}

impl BridgeClient<SerialTransport> {
    /// Opens the serial channel and waits out the settle delay.
    ///
    /// Opening the port resets the bridge, which reprints its banner before
    /// accepting commands; anything written during that window is silently
    /// lost, hence the fixed wait.
    pub fn open(settings: &Settings) -> Result<Self, ClientError> {
        let transport = SerialTransport::open(&settings.port)?;

        thread::sleep(settings.timing.settle_delay());

        Ok(Self {
            transport,
            timing: settings.timing.clone(),
        })
    }
}

impl<T: Transport> BridgeClient<T> {
    /// Builds a client over an arbitrary transport. The settle delay is a
    /// property of the serial open path and is not applied here.
    pub fn with_transport(transport: T, timing: Timing) -> Self {
        Self { transport, timing }
    }

    /// Serializes one command, writes it as a line, then pauses briefly so
    /// the bridge can start processing before anything else is written.
    pub fn send_command(&mut self, command: &Command) -> Result<(), ClientError> {
        let line = format!("{command}\n");

        tracing::debug!("send: {}", line.trim_end());
        self.transport.write_all(line.as_bytes())?;

        thread::sleep(self.timing.command_delay());
        Ok(())
    }

    /// Collects every complete line received within the wall-clock window.
    ///
    /// This is the single polling primitive every query goes through.
    /// Individual read failures (timeouts included) count as "no line yet"
    /// and are never escalated; unsolicited lines such as `TCPDATA:` land
    /// here interleaved with command responses.
    pub fn read_lines(&mut self, window: Duration) -> Vec<String> {
        let deadline = Instant::now() + window;
        let mut lines = Vec::new();

        while Instant::now() < deadline {
            match self.transport.read_line() {
                Ok(line) if !line.is_empty() => {
                    tracing::trace!("recv: {line}");
                    lines.push(line);
                }
                Ok(_) | Err(_) => {}
            }
        }

        lines
    }

    /// Joins a network. Succeeds iff a line containing `OK:Connected`
    /// appears before any line containing `ERROR` within the slow window.
    pub fn connect(&mut self, ssid: &str, password: &str) -> Result<(), ClientError> {
        let window = self.timing.slow_window();

        self.send_command(&Command::Connect {
            ssid: ssid.to_string(),
            password: password.to_string(),
        })?;

        self.await_ok("OK:Connected", window)
    }

    /// Best effort: the bridge's acknowledgement is not awaited.
    pub fn disconnect(&mut self) -> Result<(), ClientError> {
        self.send_command(&Command::Disconnect)
    }

    /// Queries the radio state, folding all lines in the fast window into
    /// one status (later lines of the same prefix win).
    pub fn status(&mut self) -> Result<WifiStatus, ClientError> {
        let window = self.timing.fast_window();

        self.send_command(&Command::Status)?;

        Ok(WifiStatus::from_lines(&self.read_lines(window)))
    }

    /// Scans for networks. Records keep the bridge's arrival order;
    /// malformed `NETWORK:` lines are skipped, not errored.
    pub fn scan(&mut self) -> Result<Vec<NetworkRecord>, ClientError> {
        let window = self.timing.slow_window();

        self.send_command(&Command::Scan)?;

        Ok(self
            .read_lines(window)
            .iter()
            .filter_map(|line| NetworkRecord::parse_line(line))
            .collect())
    }

    /// Returns the suffix of the first `IP:` line in the window, verbatim.
    pub fn ip(&mut self) -> Result<String, ClientError> {
        let window = self.timing.fast_window();

        self.send_command(&Command::Ip)?;

        self.read_lines(window)
            .iter()
            .find_map(|line| line.strip_prefix("IP:").map(str::to_string))
            .ok_or(ClientError::NoAddress)
    }

    /// Opens the bridge's single TCP session.
    pub fn tcp_connect(&mut self, host: &str, port: u16) -> Result<(), ClientError> {
        let window = self.timing.slow_window();

        self.send_command(&Command::TcpConnect {
            host: host.to_string(),
            port,
        })?;

        self.await_ok("OK:TCP connected", window)
    }

    /// Sends data over the open TCP session; no confirmation is awaited.
    pub fn tcp_send(&mut self, data: &str) -> Result<(), ClientError> {
        self.send_command(&Command::TcpSend(data.to_string()))
    }

    /// Closes the TCP session; no confirmation is awaited.
    pub fn tcp_close(&mut self) -> Result<(), ClientError> {
        self.send_command(&Command::TcpClose)
    }

    /// Releases the serial channel. Dropping the client has the same effect,
    /// so a double close is unrepresentable.
    pub fn close(self) {}

    /// Scans the window's lines in arrival order and stops at the first
    /// decisive one: the success marker wins, any `ERROR` substring fails
    /// the call, and a window with neither is a timeout.
    fn await_ok(&mut self, marker: &str, window: Duration) -> Result<(), ClientError> {
        for line in self.read_lines(window) {
            if line.contains(marker) {
                return Ok(());
            }
            if line.contains("ERROR") {
                return Err(ClientError::Protocol(line));
            }
        }

        Err(ClientError::Timeout(window))
    }
}
