//! # Modbus Bootloader Library
//!
//! A Rust client for the vendor bootloader extension carried inside a
//! reserved Modbus function code. It wakes a device's resident bootloader,
//! queries its identity, blank-checks and erases the application area, and
//! writes or reads back application firmware.
//!
//! ## Features
//!
//! - Bit-exact request encoding (big-endian fields, 3-byte offsets)
//! - Typed classification of success, device exceptions and protocol violations
//! - One in-flight transaction per client, safe to share between threads
//! - Chunked image transfer with progress reporting
//! - Transport-agnostic: bring any link that implements [`Transport`]
//!
//! ## Example
//!
//! ```no_run
//! use modbus_bootloader::{BootloaderClient, Pdu, Transport, TransportError};
//!
//! struct Link;
//!
//! impl Transport for Link {
//!     fn submit(&mut self, _request: &Pdu) -> Result<Pdu, TransportError> {
//!         Err(TransportError::Disconnected)
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BootloaderClient::new(Link);
//!     client.wake()?;
//!     let identity = client.ident()?;
//!     println!("Device: {}", identity);
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod commands;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod exception;
pub mod protocol;
pub mod transport;
pub mod types;

pub use commands::{BootloaderCommand, FrameStyle};
pub use config::ClientConfig;
pub use diagnostics::{DiagnosticSink, LogSink};
pub use error::{BootloaderError, ProtocolError, Result, TransportError};
pub use exception::DeviceException;
pub use protocol::BootloaderClient;
pub use transport::{Pdu, Transport};
pub use types::*;
