//! Protocol constants for the bootloader sub-protocol.
//!
//! This module defines the function codes, exception bit, exception codes
//! and transfer limits shared by the codec, the executor and the
//! configuration defaults.

/// Default function code carrying bootloader sub-commands
pub const DEFAULT_BOOTLOADER_FUNCTION_CODE: u8 = 0x41;

/// Default function code for the identify request
pub const DEFAULT_IDENT_FUNCTION_CODE: u8 = 0x42;

/// Default unit identifier of the target device
pub const DEFAULT_UNIT_ID: u8 = 1;

/// Bit set on the echoed function code of an exception response
pub const EXCEPTION_BIT: u8 = 0x80;

/// Largest data block a single WriteApp/ReadApp can carry (1-byte length field)
pub const MAX_CHUNK_LEN: usize = 255;

/// Exclusive upper bound of an offset that survives the 3-byte wire field
pub const OFFSET_LIMIT: u32 = 1 << 24;

/// Exception codes defined by the generic Modbus exception space
pub mod exceptions {
    pub const ILLEGAL_FUNCTION: u8 = 0x01;
    pub const ILLEGAL_DATA_ADDRESS: u8 = 0x02;
    pub const ILLEGAL_DATA_VALUE: u8 = 0x03;
    pub const SERVER_DEVICE_FAILURE: u8 = 0x04;
    pub const ACKNOWLEDGE: u8 = 0x05;
    pub const SERVER_DEVICE_BUSY: u8 = 0x06;
    pub const MEMORY_PARITY_ERROR: u8 = 0x08;
    pub const GATEWAY_PATH_UNAVAILABLE: u8 = 0x0A;
    pub const GATEWAY_TARGET_FAILED_TO_RESPOND: u8 = 0x0B;

    /// Device must be woken before it accepts this command
    pub const WAKE_REQUIRED: u8 = 0xFF;
    /// Sub-command byte not understood by the bootloader
    pub const BAD_COMMAND: u8 = 0xFE;
    /// Image or block CRC did not match
    pub const CRC_MISMATCH: u8 = 0xFD;
    /// Offset outside the application area
    pub const BAD_OFFSET: u8 = 0xFC;
    /// Data block rejected
    pub const BAD_DATA: u8 = 0xFB;
}
