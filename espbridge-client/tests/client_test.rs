use espbridge_client::{BridgeClient, ClientError};
use espbridge_proto::NetworkRecord;

mod common;

use common::{ScriptedTransport, test_timing};

fn client(responses: &[&str]) -> BridgeClient<ScriptedTransport> {
    BridgeClient::with_transport(ScriptedTransport::new(responses), test_timing())
}

#[test]
fn test_connect_succeeds_on_ok_line() {
    let mut client = client(&["CONNECTING:TestNet", "OK:Connected", "IP:192.168.1.42"]);

    client.connect("TestNet", "secret123").unwrap();
}

#[test]
fn test_wire_lines_match_grammar() {
    let transport = ScriptedTransport::new(&["OK:Connected"]);
    let sent = transport.sent_log();
    let mut client = BridgeClient::with_transport(transport, test_timing());

    client.connect("TestNet", "secret123").unwrap();
    client.disconnect().unwrap();
    client.tcp_send("payload").unwrap();
    client.tcp_close().unwrap();

    assert_eq!(
        *sent.borrow(),
        vec![
            "CONNECT:TestNet:secret123",
            "DISCONNECT",
            "TCPSEND:payload",
            "TCPCLOSE",
        ]
    );
}

#[test]
fn test_connect_fails_on_error_before_ok() {
    let mut client = client(&["ERROR:Connection failed", "OK:Connected"]);

    match client.connect("TestNet", "wrong") {
        Err(ClientError::Protocol(line)) => assert_eq!(line, "ERROR:Connection failed"),
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[test]
fn test_connect_ok_before_error_wins() {
    let mut client = client(&["OK:Connected", "ERROR:stale"]);

    client.connect("TestNet", "secret123").unwrap();
}

#[test]
fn test_connect_times_out_without_decisive_line() {
    let mut client = client(&["CONNECTING:TestNet", "noise"]);

    assert!(matches!(
        client.connect("TestNet", "secret123"),
        Err(ClientError::Timeout(_))
    ));
}

#[test]
fn test_status_folds_prefixes_last_wins() {
    let mut client = client(&[
        "STATUS:CONNECTED",
        "SSID:OldNet",
        "SSID:HomeWiFi",
        "IP:192.168.1.42",
        "RSSI:-45 dBm",
    ]);

    let status = client.status().unwrap();

    assert!(status.connected);
    assert_eq!(status.ssid, "HomeWiFi");
    assert_eq!(status.ip, "192.168.1.42");
    assert_eq!(status.rssi, -45);
}

#[test]
fn test_status_tolerates_interleaved_tcp_data() {
    let mut client = client(&[
        "TCPDATA:hello from peer",
        "STATUS:CONNECTED",
        "SSID:HomeWiFi",
        "TCPDATA:more",
        "IP:10.0.0.5",
        "RSSI:-51 dBm",
    ]);

    let status = client.status().unwrap();

    assert!(status.connected);
    assert_eq!(status.ssid, "HomeWiFi");
    assert_eq!(status.ip, "10.0.0.5");
    assert_eq!(status.rssi, -51);
}

#[test]
fn test_scan_parses_records_in_arrival_order() {
    let mut client = client(&[
        "SCAN:Found 2 networks",
        "NETWORK:Home:-45:SECURED",
        "NETWORK:Guest:-60:OPEN",
    ]);

    let networks = client.scan().unwrap();

    assert_eq!(
        networks,
        vec![
            NetworkRecord {
                ssid: "Home".to_string(),
                rssi: -45,
                secured: true,
            },
            NetworkRecord {
                ssid: "Guest".to_string(),
                rssi: -60,
                secured: false,
            },
        ]
    );
}

#[test]
fn test_scan_skips_malformed_lines() {
    let mut client = client(&[
        "SCAN:Found 3 networks",
        "NETWORK:TooShort",
        "NETWORK:BadRssi:notanumber:OPEN",
        "TCPDATA:interleaved",
        "NETWORK:Cafe:-72:SECURED",
    ]);

    let networks = client.scan().unwrap();

    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].ssid, "Cafe");
}

#[test]
fn test_scan_empty_window_yields_empty_list() {
    let mut client = client(&["SCAN:No networks found"]);

    assert!(client.scan().unwrap().is_empty());
}

#[test]
fn test_ip_returns_first_ip_line_verbatim() {
    let mut client = client(&["TCPDATA:noise", "IP:192.168.1.42", "IP:10.0.0.1"]);

    assert_eq!(client.ip().unwrap(), "192.168.1.42");
}

#[test]
fn test_ip_without_address_fails() {
    let mut client = client(&["ERROR:Not connected to WiFi"]);

    assert!(matches!(client.ip(), Err(ClientError::NoAddress)));
}

#[test]
fn test_tcp_connect_matches_ok_and_error() {
    let mut ok = client(&["OK:TCP connected"]);
    ok.tcp_connect("example.com", 80).unwrap();

    let mut failed = client(&["ERROR:TCP connection failed"]);
    assert!(matches!(
        failed.tcp_connect("example.com", 80),
        Err(ClientError::Protocol(_))
    ));

    let mut silent = client(&[]);
    assert!(matches!(
        silent.tcp_connect("example.com", 80),
        Err(ClientError::Timeout(_))
    ));
}

#[test]
fn test_fire_and_forget_calls_only_write() {
    let mut client = BridgeClient::with_transport(ScriptedTransport::empty(), test_timing());

    client.disconnect().unwrap();
    client.tcp_send("GET / HTTP/1.1").unwrap();
    client.tcp_close().unwrap();
}
