use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::simulate::SimulatedNetwork;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uart {
    pub port_path: String,
    pub baud_rate: u32,
}

/// Simulated radio environment served by the `bridge-sim` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Radio {
    pub ip: String,
    pub echo: bool,
    pub networks: Vec<SimulatedNetwork>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub uart: Uart,
    pub radio: Radio,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let settings: Settings = toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/configs/default.toml"
        )))?;

        Ok(settings)
    }
}
