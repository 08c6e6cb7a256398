use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;

use serialport::SerialPort;

use crate::error::ClientError;
use crate::settings::Port;

/// Byte-level seam under the client, so tests can substitute the serial
/// device with a scripted or in-memory peer.
pub trait Transport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Reads one `\n`-terminated line with the terminator stripped.
    /// Blocks at most for the transport's own read timeout.
    fn read_line(&mut self) -> io::Result<String>;
}

/// The real UART channel: a serial port plus a buffered reader over a clone
/// of the same handle.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    reader: BufReader<Box<dyn SerialPort>>,
}

impl SerialTransport {
    pub fn open(port: &Port) -> Result<Self, ClientError> {
        let open_err = |source| ClientError::Open {
            path: port.path.clone(),
            source,
        };

        let handle = serialport::new(&port.path, port.baud_rate)
            .timeout(Duration::from_millis(port.read_timeout_ms))
            .open()
            .map_err(open_err)?;
        let reader = BufReader::new(handle.try_clone().map_err(open_err)?);

        tracing::debug!("opened serial port {} at {} baud", port.path, port.baud_rate);

        Ok(Self {
            port: handle,
            reader,
        })
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;

        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "serial port closed",
            ));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
