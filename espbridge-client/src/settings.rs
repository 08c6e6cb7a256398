use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Serial channel parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    pub path: String,
    pub baud_rate: u32,
    /// Timeout of one underlying serial read, distinct from the call-level
    /// polling windows in [`Timing`].
    pub read_timeout_ms: u64,
}

impl Default for Port {
    fn default() -> Self {
        Self {
            path: "/dev/ttyS0".to_string(),
            baud_rate: 115_200,
            read_timeout_ms: 1_000,
        }
    }
}

/// The timing contract of the unframed line protocol.
///
/// The defaults are the compatibility values; shrinking them against real
/// hardware risks false timeouts, since a slow bridge may answer after the
/// window has closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Wait after opening the port: the bridge resets on open and reprints
    /// its banner, silently dropping anything sent earlier.
    pub settle_delay_ms: u64,
    /// Pause after each command write so the bridge can start processing.
    pub command_delay_ms: u64,
    /// Polling window for fast queries (`STATUS`, `IP`).
    pub fast_window_ms: u64,
    /// Polling window for slow operations (`CONNECT`, `SCAN`, `TCPCONNECT`).
    pub slow_window_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_delay_ms: 2_000,
            command_delay_ms: 100,
            fast_window_ms: 1_000,
            slow_window_ms: 5_000,
        }
    }
}

impl Timing {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn command_delay(&self) -> Duration {
        Duration::from_millis(self.command_delay_ms)
    }

    pub fn fast_window(&self) -> Duration {
        Duration::from_millis(self.fast_window_ms)
    }

    pub fn slow_window(&self) -> Duration {
        Duration::from_millis(self.slow_window_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub port: Port,
    pub timing: Timing,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
