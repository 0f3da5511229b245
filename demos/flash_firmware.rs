//! Flash Firmware Example
//!
//! Walks a full update cycle against an in-memory bootloader:
//! - Waking the bootloader (retrying automatically when it is asleep)
//! - Erasing and blank-checking the application area
//! - Writing an image in chunks with progress output
//! - Reading the image back and verifying it
//!
//! Usage:
//!   cargo run --example flash_firmware
//!   cargo run --example flash_firmware -- config.json   # custom client config
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=trace cargo run --example flash_firmware   # dump every PDU

mod simulated;

use log::{info, warn};
use modbus_bootloader::{BootloaderClient, ClientConfig};
use simulated::SimulatedDevice;
use std::error::Error;

fn load_config() -> Result<ClientConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            Ok(ClientConfig::from_json(&text)?)
        }
        None => Ok(ClientConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger with default info level if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let device = SimulatedDevice::new(config.clone(), 64 * 1024);
    let client = BootloaderClient::with_config(device, config);

    let firmware: Vec<u8> = (0..10_000u32).map(|i| (i ^ (i >> 8)) as u8).collect();
    let start = 0x1000;

    info!("=== Preparing Device ===");
    client.with_wake(|c| c.erase_app())?;
    client.blank_check()?;
    info!("Application area erased and blank");

    info!("=== Writing {} bytes at {:#08x} ===", firmware.len(), start);
    client.init_write_app()?;
    let mut last_percent = 0;
    client.write_image(&firmware, start, |progress| {
        let percent = progress.percent();
        if percent >= last_percent + 10 || progress.done == progress.total {
            info!("Written {}/{} bytes ({}%)", progress.done, progress.total, percent);
            last_percent = percent;
        }
    })?;
    client.finish_write_app()?;

    info!("=== Verifying ===");
    let read_back = client.read_image(start, firmware.len(), |_| {})?;
    if read_back == firmware {
        info!("✓ Image verified");
    } else {
        warn!("✗ Read-back differs from written image");
    }

    client.reset()?;
    info!("=== Flash Complete ===");

    Ok(())
}
