use std::thread;
use std::time::Duration;

use espbridge_proto::{Command, Response};

use crate::radio::WifiRadio;

const DEFAULT_CONNECT_ATTEMPTS: u32 = 20;
const DEFAULT_ATTEMPT_DELAY: Duration = Duration::from_millis(500);

/// Longest accepted command line; anything longer is discarded whole.
const MAX_LINE: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Idle,
    Connecting,
    Connected,
}

/// The bridge's command dispatcher: one command in, one or more response
/// lines out, plus unsolicited TCP data via [`poll_tcp`].
///
/// Dispatch is synchronous and single-threaded; the surrounding loop
/// alternates between draining the UART and polling the TCP session, so
/// command handling and data forwarding interleave at line granularity.
///
/// [`poll_tcp`]: Bridge::poll_tcp
pub struct Bridge<R: WifiRadio> {
    radio: R,
    state: LinkState,
    connect_attempts: u32,
    attempt_delay: Duration,
}

impl<R: WifiRadio> Bridge<R> {
    pub fn new(radio: R) -> Self {
        Self {
            radio,
            state: LinkState::Idle,
            connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
            attempt_delay: DEFAULT_ATTEMPT_DELAY,
        }
    }

    pub fn with_connect_attempts(mut self, attempts: u32) -> Self {
        self.connect_attempts = attempts;
        self
    }

    pub fn with_attempt_delay(mut self, delay: Duration) -> Self {
        self.attempt_delay = delay;
        self
    }

    pub fn state(&self) -> &LinkState {
        &self.state
    }

    /// Lines printed once on startup. The host-side settle delay exists to
    /// wait these out after a port open resets the bridge.
    pub fn banner(&self) -> Vec<String> {
        vec![
            "READY".to_string(),
            format!("ESP32 WiFi Bridge v{}", env!("CARGO_PKG_VERSION")),
            "Waiting for commands...".to_string(),
        ]
    }

    /// Dispatches one received line. Unparseable commands answer with an
    /// `ERROR:` line rather than failing the loop.
    pub fn handle_line(&mut self, line: &str) -> Vec<Response> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        match Command::parse(line) {
            Ok(command) => {
                tracing::debug!("dispatch: {command}");
                self.dispatch(command)
            }
            Err(err) => {
                tracing::warn!("rejected: {err}");
                vec![Response::Error(err.to_string())]
            }
        }
    }

    /// Forwards pending inbound TCP data as an unsolicited `TCPDATA:` line.
    pub fn poll_tcp(&mut self) -> Option<Response> {
        self.radio.tcp_recv().map(Response::TcpData)
    }

    fn dispatch(&mut self, command: Command) -> Vec<Response> {
        match command {
            Command::Connect { ssid, password } => self.handle_connect(&ssid, &password),
            Command::Status => self.handle_status(),
            Command::Scan => self.handle_scan(),
            Command::Disconnect => {
                self.radio.disconnect();
                self.state = LinkState::Idle;
                vec![Response::Disconnected]
            }
            Command::Ip => match self.radio.ip() {
                Some(addr) => vec![Response::Ip(addr)],
                None => vec![Response::NotConnected],
            },
            Command::TcpConnect { host, port } => self.handle_tcp_connect(&host, port),
            Command::TcpSend(data) => self.handle_tcp_send(&data),
            Command::TcpClose => {
                if self.radio.tcp_is_open() {
                    self.radio.tcp_close();
                    vec![Response::TcpClosed]
                } else {
                    vec![Response::NoTcpSession]
                }
            }
        }
    }

    fn handle_connect(&mut self, ssid: &str, password: &str) -> Vec<Response> {
        let mut out = vec![Response::Connecting(ssid.to_string())];

        self.state = LinkState::Connecting;
        if self.radio.connect(ssid, password).is_err() {
            self.state = LinkState::Idle;
            out.push(Response::ConnectFailed);
            return out;
        }

        let mut attempts = 0;
        while !self.radio.is_connected() && attempts < self.connect_attempts {
            thread::sleep(self.attempt_delay);
            attempts += 1;
        }

        if self.radio.is_connected() {
            tracing::info!("joined {ssid}");
            self.state = LinkState::Connected;
            out.push(Response::Connected);
            if let Some(addr) = self.radio.ip() {
                out.push(Response::Ip(addr));
            }
        } else {
            tracing::warn!("failed to join {ssid} after {attempts} attempts");
            self.state = LinkState::Idle;
            out.push(Response::ConnectFailed);
        }

        out
    }

    fn handle_status(&self) -> Vec<Response> {
        if !self.radio.is_connected() {
            return vec![Response::StatusDisconnected];
        }

        vec![
            Response::StatusConnected,
            Response::Ssid(self.radio.ssid().unwrap_or_default()),
            Response::Ip(self.radio.ip().unwrap_or_default()),
            Response::Rssi(self.radio.rssi().unwrap_or_default()),
        ]
    }

    fn handle_scan(&mut self) -> Vec<Response> {
        let found = self.radio.scan();
        if found.is_empty() {
            return vec![Response::ScanEmpty];
        }

        let mut out = Vec::with_capacity(found.len() + 1);
        out.push(Response::ScanFound(found.len()));
        out.extend(found.into_iter().map(Response::Network));
        out
    }

    fn handle_tcp_connect(&mut self, host: &str, port: u16) -> Vec<Response> {
        tracing::debug!("tcp connect {host}:{port}");

        match self.radio.tcp_open(host, port) {
            Ok(()) => vec![Response::TcpConnected],
            Err(_) => vec![Response::TcpConnectFailed],
        }
    }

    fn handle_tcp_send(&mut self, data: &str) -> Vec<Response> {
        if !self.radio.tcp_is_open() {
            return vec![Response::TcpNotConnected];
        }

        match self.radio.tcp_send(data) {
            Ok(()) => vec![Response::DataSent],
            Err(_) => vec![Response::TcpNotConnected],
        }
    }
}

/// Accumulates raw UART bytes into complete lines. Both `\r` and `\n`
/// terminate a line; empty segments are dropped, so `\r\n` yields one line.
#[derive(Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds received bytes and returns every line they complete.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut complete = Vec::new();

        for &byte in bytes {
            match byte {
                b'\n' | b'\r' => {
                    if !self.buffer.is_empty() {
                        complete.push(String::from_utf8_lossy(&self.buffer).into_owned());
                        self.buffer.clear();
                    }
                }
                _ => {
                    if self.buffer.len() >= MAX_LINE {
                        tracing::warn!("discarding oversized command line");
                        self.buffer.clear();
                    }
                    self.buffer.push(byte);
                }
            }
        }

        complete
    }
}
