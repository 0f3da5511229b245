//! Identify Example
//!
//! Queries the identity and bootloader info block of an in-memory device
//! and prints them as JSON.
//!
//! Usage:
//!   cargo run --example identify

mod simulated;

use log::info;
use modbus_bootloader::{BootloaderClient, ClientConfig};
use simulated::SimulatedDevice;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::default();
    let client = BootloaderClient::with_config(SimulatedDevice::new(config.clone(), 4096), config);

    let identity = client.ident()?;
    let info = client.with_wake(|c| c.bootloader_info())?;

    info!("Identity: {}", identity);
    println!("{}", serde_json::to_string_pretty(&identity)?);
    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}
