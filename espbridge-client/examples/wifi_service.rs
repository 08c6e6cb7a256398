//! Service-style usage: a caller-level health check with manual reconnect.
//! The client itself never retries; this loop is where that policy lives.

use std::thread;
use std::time::Duration;

use espbridge_client::{BridgeClient, Settings};

const SSID: &str = "YourSSID";
const PASSWORD: &str = "YourPassword";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let settings = Settings::default();
    let mut client = BridgeClient::open(&settings)?;

    client.connect(SSID, PASSWORD)?;
    println!("WiFi service started, monitoring connection");

    loop {
        thread::sleep(Duration::from_secs(30));

        match client.status() {
            Ok(status) if status.connected => {
                println!(
                    "connected: {} ({} dBm) ip {}",
                    status.ssid, status.rssi, status.ip
                );
            }
            Ok(_) => {
                println!("connection lost, reconnecting");
                if let Err(err) = client.connect(SSID, PASSWORD) {
                    println!("reconnect failed: {err}");
                }
            }
            Err(err) => println!("status check failed: {err}"),
        }
    }
}
