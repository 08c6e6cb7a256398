//! Shared wire vocabulary for the ESP32 WiFi bridge.
//!
//! The bridge speaks a line-oriented ASCII protocol over a UART: one command
//! or response per `\n`-terminated line, colon-separated fields, no escaping.
//! Both sides of the link use these types so the grammar lives in one place.

pub mod command;
pub mod models;
pub mod response;

pub use command::{Command, ParseError};
pub use models::{NetworkRecord, WifiStatus};
pub use response::Response;
