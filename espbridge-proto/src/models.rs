use serde::{Deserialize, Serialize};

/// Radio state as reported by the bridge in response to `STATUS`.
///
/// Rebuilt from response lines on every query; nothing is cached on the host
/// side. Fields default to empty/zero when the bridge omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiStatus {
    pub connected: bool,
    pub ssid: String,
    pub ip: String,
    pub rssi: i32,
}

impl WifiStatus {
    /// Folds a window of response lines into one status by prefix.
    ///
    /// Later lines overwrite earlier ones of the same prefix. The connected
    /// flag is the substring check the bridge protocol has always used:
    /// any `STATUS:` line containing `CONNECTED` sets it, which includes
    /// `STATUS:DISCONNECTED` - a compatibility quirk that callers inherit.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut status = WifiStatus::default();

        for line in lines {
            let line = line.as_ref();

            if line.starts_with("STATUS:") {
                status.connected = line.contains("CONNECTED");
            } else if let Some(ssid) = line.strip_prefix("SSID:") {
                status.ssid = ssid.to_string();
            } else if let Some(ip) = line.strip_prefix("IP:") {
                status.ip = ip.to_string();
            } else if let Some(rssi) = line.strip_prefix("RSSI:") {
                // Trailing unit text (" dBm") is ignored.
                if let Some(value) = leading_int(rssi) {
                    status.rssi = value;
                }
            }
        }

        status
    }
}

/// One scan result. The set is rebuilt from scratch on every `SCAN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub ssid: String,
    pub rssi: i32,
    pub secured: bool,
}

impl NetworkRecord {
    pub const PREFIX: &'static str = "NETWORK:";

    /// Parses a `NETWORK:<ssid>:<rssi>:<OPEN|SECURED>` line.
    ///
    /// Returns `None` for anything malformed: wrong prefix, fewer than three
    /// fields, or a non-numeric RSSI. Extra fields are ignored.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix(Self::PREFIX)?;
        let parts: Vec<&str> = rest.split(':').collect();

        if parts.len() < 3 {
            return None;
        }

        Some(Self {
            ssid: parts[0].to_string(),
            rssi: leading_int(parts[1])?,
            secured: parts[2] == "SECURED",
        })
    }
}

/// Parses the leading integer of `s`, stopping at the first non-digit.
pub fn leading_int(s: &str) -> Option<i32> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    i32::try_from(if negative { -value } else { value }).ok()
}
