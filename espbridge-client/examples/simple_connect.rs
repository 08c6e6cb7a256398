//! Joins a network and prints the assigned address.
//!
//! Usage: `simple_connect [port] [ssid] [password]`

use std::env;

use espbridge_client::{BridgeClient, Settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let mut args = env::args().skip(1);
    let mut settings = Settings::default();
    if let Some(path) = args.next() {
        settings.port.path = path;
    }
    let ssid = args.next().unwrap_or_else(|| "YourSSID".to_string());
    let password = args.next().unwrap_or_else(|| "YourPassword".to_string());

    let mut client = BridgeClient::open(&settings)?;

    client.connect(&ssid, &password)?;
    let ip = client.ip()?;

    println!("Connected! IP: {ip}");

    Ok(())
}
