use std::io;
use std::time::Duration;

/// Failure taxonomy of one client call.
///
/// Transport failures leave the connection unusable until reopened. A
/// timeout or a bridge-reported error is recoverable; retry policy is the
/// caller's responsibility, the client never retries on its own.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to open port {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("serial transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("no decisive response within {0:?}")]
    Timeout(Duration),

    /// The bridge answered with an `ERROR:` line; the raw line is kept for
    /// diagnostics.
    #[error("bridge reported failure: {0}")]
    Protocol(String),

    #[error("no IP address received")]
    NoAddress,
}
