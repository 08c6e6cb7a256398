//! Wires the client to the firmware dispatcher over an in-memory transport
//! and drives whole operations end to end.

use std::collections::VecDeque;
use std::io;
use std::str;
use std::time::Duration;

use espbridge_client::{BridgeClient, ClientError, Transport};
use espbridge_firmware::{Bridge, SimulatedNetwork, SimulatedRadio};

mod common;

use common::test_timing;

/// In-memory peer: written bytes are accumulated into lines and dispatched
/// straight into the bridge; reads drain the bridge's responses plus any
/// unsolicited TCP data, like the serial link would interleave them.
struct BridgeTransport {
    bridge: Bridge<SimulatedRadio>,
    pending: String,
    inbox: VecDeque<String>,
}

impl BridgeTransport {
    fn new(bridge: Bridge<SimulatedRadio>) -> Self {
        Self {
            bridge,
            pending: String::new(),
            inbox: VecDeque::new(),
        }
    }
}

impl Transport for BridgeTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let text = str::from_utf8(bytes)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.pending.push_str(text);

        while let Some(pos) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=pos).collect();

            for response in self.bridge.handle_line(line.trim_end()) {
                self.inbox.push_back(response.to_string());
            }
        }

        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        if let Some(data) = self.bridge.poll_tcp() {
            self.inbox.push_back(data.to_string());
        }

        self.inbox
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::TimedOut, "no data"))
    }
}

fn simulated_client() -> BridgeClient<BridgeTransport> {
    let radio = SimulatedRadio::new(vec![
        SimulatedNetwork {
            ssid: "TestNet".to_string(),
            password: Some("secret123".to_string()),
            rssi: -45,
        },
        SimulatedNetwork {
            ssid: "Guest".to_string(),
            password: None,
            rssi: -60,
        },
    ])
    .with_ip("192.168.1.42");

    let bridge = Bridge::new(radio)
        .with_connect_attempts(1)
        .with_attempt_delay(Duration::ZERO);

    BridgeClient::with_transport(BridgeTransport::new(bridge), test_timing())
}

#[test]
fn test_connect_then_ip_roundtrip() {
    let mut client = simulated_client();

    client.connect("TestNet", "secret123").unwrap();

    assert_eq!(client.ip().unwrap(), "192.168.1.42");
}

#[test]
fn test_status_reflects_joined_network() {
    let mut client = simulated_client();

    client.connect("TestNet", "secret123").unwrap();
    let status = client.status().unwrap();

    assert!(status.connected);
    assert_eq!(status.ssid, "TestNet");
    assert_eq!(status.ip, "192.168.1.42");
    assert_eq!(status.rssi, -45);
}

#[test]
fn test_scan_lists_configured_networks_in_order() {
    let mut client = simulated_client();

    let networks = client.scan().unwrap();

    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0].ssid, "TestNet");
    assert!(networks[0].secured);
    assert_eq!(networks[1].ssid, "Guest");
    assert!(!networks[1].secured);
}

#[test]
fn test_wrong_password_is_a_protocol_error() {
    let mut client = simulated_client();

    match client.connect("TestNet", "wrong") {
        Err(ClientError::Protocol(line)) => assert_eq!(line, "ERROR:Connection failed"),
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[test]
fn test_ip_before_connect_has_no_address() {
    let mut client = simulated_client();

    assert!(matches!(client.ip(), Err(ClientError::NoAddress)));
}

#[test]
fn test_tcp_session_echoes_unsolicited_data() {
    let mut client = simulated_client();

    client.connect("TestNet", "secret123").unwrap();
    client.tcp_connect("example.com", 80).unwrap();
    client.tcp_send("ping").unwrap();

    let lines = client.read_lines(Duration::from_millis(20));
    assert!(lines.iter().any(|line| line == "TCPDATA:ping"));

    client.tcp_close().unwrap();
}

#[test]
fn test_tcp_connect_without_wifi_fails() {
    let mut client = simulated_client();

    match client.tcp_connect("example.com", 80) {
        Err(ClientError::Protocol(line)) => assert_eq!(line, "ERROR:TCP connection failed"),
        other => panic!("expected protocol error, got {other:?}"),
    }
}
