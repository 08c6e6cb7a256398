use core::fmt;

use serde::{Deserialize, Serialize};

/// One outbound instruction from the host to the bridge.
///
/// Serialized as a single colon-delimited line with a case-sensitive verb.
/// The grammar defines no escaping, so an SSID containing a colon will
/// mis-split on the peer; that limitation is part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Connect { ssid: String, password: String },
    Status,
    Scan,
    Disconnect,
    Ip,
    TcpConnect { host: String, port: u16 },
    TcpSend(String),
    TcpClose,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid CONNECT format. Use CONNECT:SSID:PASSWORD")]
    InvalidConnect,

    #[error("Invalid TCPCONNECT format")]
    InvalidTcpConnect,
}

impl Command {
    /// Parses one trimmed command line.
    ///
    /// `CONNECT` splits at the first colon after the SSID, so the password
    /// keeps any colons it contains. `TCPCONNECT` splits at the last colon,
    /// so the host part may contain colons. `TCPSEND` takes the remainder of
    /// the line verbatim.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("CONNECT:") {
            let split = rest.find(':').ok_or(ParseError::InvalidConnect)?;

            return Ok(Command::Connect {
                ssid: rest[..split].to_string(),
                password: rest[split + 1..].to_string(),
            });
        }

        if let Some(rest) = line.strip_prefix("TCPCONNECT:") {
            let split = match rest.rfind(':') {
                // The split colon must leave a non-empty host.
                Some(0) | None => return Err(ParseError::InvalidTcpConnect),
                Some(split) => split,
            };
            let port = rest[split + 1..]
                .parse()
                .map_err(|_| ParseError::InvalidTcpConnect)?;

            return Ok(Command::TcpConnect {
                host: rest[..split].to_string(),
                port,
            });
        }

        if let Some(data) = line.strip_prefix("TCPSEND:") {
            return Ok(Command::TcpSend(data.to_string()));
        }

        match line {
            "STATUS" => Ok(Command::Status),
            "SCAN" => Ok(Command::Scan),
            "DISCONNECT" => Ok(Command::Disconnect),
            "IP" => Ok(Command::Ip),
            "TCPCLOSE" => Ok(Command::TcpClose),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Connect { ssid, password } => write!(f, "CONNECT:{ssid}:{password}"),
            Command::Status => write!(f, "STATUS"),
            Command::Scan => write!(f, "SCAN"),
            Command::Disconnect => write!(f, "DISCONNECT"),
            Command::Ip => write!(f, "IP"),
            Command::TcpConnect { host, port } => write!(f, "TCPCONNECT:{host}:{port}"),
            Command::TcpSend(data) => write!(f, "TCPSEND:{data}"),
            Command::TcpClose => write!(f, "TCPCLOSE"),
        }
    }
}
