use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use espbridge_proto::NetworkRecord;

use crate::radio::WifiRadio;

/// One network visible to the simulated radio. A network without a password
/// is open; joining a secured one requires the exact password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedNetwork {
    pub ssid: String,
    pub password: Option<String>,
    pub rssi: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulatedError {
    #[error("WiFi not joined")]
    NotJoined,

    #[error("no TCP session")]
    NoSession,
}

struct TcpSession {
    inbound: VecDeque<String>,
}

/// Stand-in for the radio hardware: joins only configured networks and, in
/// echo mode, reflects every TCP send back as inbound data so the
/// unsolicited `TCPDATA:` path can be exercised without a real peer.
pub struct SimulatedRadio {
    networks: Vec<SimulatedNetwork>,
    joined: Option<usize>,
    ip: String,
    echo: bool,
    session: Option<TcpSession>,
}

impl SimulatedRadio {
    pub fn new(networks: Vec<SimulatedNetwork>) -> Self {
        Self {
            networks,
            joined: None,
            ip: "192.168.1.100".to_string(),
            echo: true,
            session: None,
        }
    }

    /// Address reported once joined.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn credentials_match(network: &SimulatedNetwork, password: &str) -> bool {
        match &network.password {
            Some(expected) => expected == password,
            None => true,
        }
    }
}

impl WifiRadio for SimulatedRadio {
    type Error = SimulatedError;

    fn connect(&mut self, ssid: &str, password: &str) -> Result<(), Self::Error> {
        // Initiation never fails, like the hardware; a bad SSID or password
        // just never reaches the connected state.
        self.joined = self
            .networks
            .iter()
            .position(|network| network.ssid == ssid && Self::credentials_match(network, password));

        Ok(())
    }

    fn disconnect(&mut self) {
        self.joined = None;
        self.session = None;
    }

    fn is_connected(&self) -> bool {
        self.joined.is_some()
    }

    fn ssid(&self) -> Option<String> {
        self.joined.map(|index| self.networks[index].ssid.clone())
    }

    fn ip(&self) -> Option<String> {
        self.joined.map(|_| self.ip.clone())
    }

    fn rssi(&self) -> Option<i32> {
        self.joined.map(|index| self.networks[index].rssi)
    }

    fn scan(&mut self) -> Vec<NetworkRecord> {
        self.networks
            .iter()
            .map(|network| NetworkRecord {
                ssid: network.ssid.clone(),
                rssi: network.rssi,
                secured: network.password.is_some(),
            })
            .collect()
    }

    fn tcp_open(&mut self, _host: &str, _port: u16) -> Result<(), Self::Error> {
        if !self.is_connected() {
            return Err(SimulatedError::NotJoined);
        }

        // Replaces any session already open; only one may exist.
        self.session = Some(TcpSession {
            inbound: VecDeque::new(),
        });
        Ok(())
    }

    fn tcp_is_open(&self) -> bool {
        self.session.is_some()
    }

    fn tcp_send(&mut self, data: &str) -> Result<(), Self::Error> {
        let echo = self.echo;
        let session = self.session.as_mut().ok_or(SimulatedError::NoSession)?;

        if echo {
            session.inbound.push_back(data.to_string());
        }
        Ok(())
    }

    fn tcp_close(&mut self) {
        self.session = None;
    }

    fn tcp_recv(&mut self) -> Option<String> {
        self.session.as_mut()?.inbound.pop_front()
    }
}
