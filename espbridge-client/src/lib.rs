//! Host-side client for the ESP32 WiFi bridge.
//!
//! The bridge owns the radio and a single TCP socket; this crate owns the
//! serial channel to it. Every operation is send-then-poll: the client
//! writes one command line, collects response lines for a fixed wall-clock
//! window, and classifies them by substring/prefix. There is no framing and
//! no request/response correlation on the wire, so the window sizes are the
//! timing contract - see [`settings::Timing`].
//!
//! The client is a stateless proxy: all WiFi/TCP state lives on the bridge
//! and is re-derived from responses on every call. Calls must be serialized
//! by the caller; the client holds a single logical channel with at most one
//! outstanding command.

pub mod client;
pub mod error;
pub mod settings;
pub mod transport;

pub use client::BridgeClient;
pub use error::ClientError;
pub use settings::{Settings, Timing};
pub use transport::{SerialTransport, Transport};
