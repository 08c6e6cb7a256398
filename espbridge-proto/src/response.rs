use core::fmt;

use serde::{Deserialize, Serialize};

use crate::models::NetworkRecord;

/// One response line from the bridge.
///
/// The `Display` impl is the single source of the wire text; the firmware
/// side emits responses only through it so the grammar cannot drift. The
/// host side deliberately stays on raw substring/prefix matching, so these
/// variants never need a symmetric parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// Progress line printed while a `CONNECT` is in flight.
    Connecting(String),
    Connected,
    ConnectFailed,
    Disconnected,
    StatusConnected,
    StatusDisconnected,
    Ssid(String),
    Ip(String),
    /// Signal strength in dBm.
    Rssi(i32),
    ScanFound(usize),
    ScanEmpty,
    Network(NetworkRecord),
    NotConnected,
    TcpConnected,
    TcpConnectFailed,
    DataSent,
    TcpNotConnected,
    TcpClosed,
    NoTcpSession,
    /// Unsolicited inbound TCP payload, interleaved with command responses.
    TcpData(String),
    Error(String),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Connecting(ssid) => write!(f, "CONNECTING:{ssid}"),
            Response::Connected => write!(f, "OK:Connected"),
            Response::ConnectFailed => write!(f, "ERROR:Connection failed"),
            Response::Disconnected => write!(f, "OK:Disconnected"),
            Response::StatusConnected => write!(f, "STATUS:CONNECTED"),
            Response::StatusDisconnected => write!(f, "STATUS:DISCONNECTED"),
            Response::Ssid(ssid) => write!(f, "SSID:{ssid}"),
            Response::Ip(addr) => write!(f, "IP:{addr}"),
            Response::Rssi(dbm) => write!(f, "RSSI:{dbm} dBm"),
            Response::ScanFound(count) => write!(f, "SCAN:Found {count} networks"),
            Response::ScanEmpty => write!(f, "SCAN:No networks found"),
            Response::Network(record) => {
                let security = if record.secured { "SECURED" } else { "OPEN" };
                write!(f, "NETWORK:{}:{}:{}", record.ssid, record.rssi, security)
            }
            Response::NotConnected => write!(f, "ERROR:Not connected to WiFi"),
            Response::TcpConnected => write!(f, "OK:TCP connected"),
            Response::TcpConnectFailed => write!(f, "ERROR:TCP connection failed"),
            Response::DataSent => write!(f, "OK:Data sent"),
            Response::TcpNotConnected => write!(f, "ERROR:Not connected"),
            Response::TcpClosed => write!(f, "OK:TCP connection closed"),
            Response::NoTcpSession => write!(f, "ERROR:No active TCP connection"),
            Response::TcpData(data) => write!(f, "TCPDATA:{data}"),
            Response::Error(message) => write!(f, "ERROR:{message}"),
        }
    }
}
