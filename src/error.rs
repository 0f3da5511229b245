//! Error types for bootloader operations.

use crate::exception::DeviceException;
use thiserror::Error;

/// Result type alias for bootloader operations.
pub type Result<T> = std::result::Result<T, BootloaderError>;

/// Errors raised by the transport collaborator.
///
/// These pass through the transaction layer unchanged.
#[derive(Error, Debug)]
pub enum TransportError {
    /// No response within the transport's own deadline
    #[error("Communication timeout")]
    Timeout,

    /// Link dropped or never established
    #[error("Transport disconnected")]
    Disconnected,

    /// Bytes arrived but could not be framed into a PDU
    #[error("Framing error: {0}")]
    Framing(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Response shapes that break the wire contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Response function code is neither the echo nor the exception echo
    #[error("unexpected response code {actual:#04x} (expected {expected:#04x})")]
    UnexpectedFunctionCode {
        /// Function code of the request
        expected: u8,
        /// Function code found in the response
        actual: u8,
    },

    /// Exception echo whose payload is not exactly one byte
    #[error("exception response carries {length} bytes (expected 1)")]
    MalformedException {
        /// Payload length received
        length: usize,
    },

    /// Read response without the leading status byte
    #[error("read response is missing its status byte")]
    MissingStatusByte,

    /// Read response carrying a different amount of data than requested
    #[error("read returned {actual} bytes (requested {expected})")]
    ShortRead {
        /// Bytes requested
        expected: usize,
        /// Bytes received after the status byte
        actual: usize,
    },
}

/// Error types for bootloader communication.
#[derive(Error, Debug)]
pub enum BootloaderError {
    /// Transport-level failure, not retried here
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Malformed or unexpected response
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Fault reported by the device
    #[error("Device exception: {0}")]
    Device(#[from] DeviceException),

    /// Image transfer reaching past the 3-byte offset field
    #[error("Offset out of range: {offset:#08x} + {length} bytes exceeds 24-bit address space")]
    OffsetOutOfRange {
        /// Start offset of the transfer
        offset: u32,
        /// Transfer length
        length: usize,
    },

    /// Sub-command byte with no known meaning
    #[error("Unknown bootloader command: {0:#04x}")]
    UnknownCommand(u8),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl BootloaderError {
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, BootloaderError::Protocol(_))
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, BootloaderError::Transport(_))
    }

    /// The device exception carried by this error, if any
    pub fn device_exception(&self) -> Option<DeviceException> {
        match self {
            BootloaderError::Device(exception) => Some(*exception),
            _ => None,
        }
    }
}
