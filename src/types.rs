use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity reported by the device, kept byte for byte
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity(Vec<u8>);

impl DeviceIdentity {
    pub fn new(raw: Vec<u8>) -> Self {
        DeviceIdentity(raw)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Lossy text rendering; the raw bytes stay available via `as_bytes`
impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Bootloader info block, returned verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootloaderInfo {
    pub raw: Vec<u8>,
}

/// Progress of a chunked image transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransferProgress {
    /// Offset of the chunk just completed
    pub offset: u32,
    /// Bytes transferred so far
    pub done: usize,
    /// Bytes in the whole transfer
    pub total: usize,
}

impl TransferProgress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.done as f64 / self.total as f64) * 100.0).round() as u8
    }
}
