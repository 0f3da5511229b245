//! Mapping of device exception codes to typed errors.

use crate::constants::exceptions::*;
use std::fmt;

/// Fault reported by the device in the single byte of an exception response.
///
/// The mapping is total: every byte has exactly one variant, and codes
/// without a dedicated meaning land in [`DeviceException::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DeviceException {
    IllegalFunction,
    IllegalDataAddress,
    IllegalDataValue,
    ServerDeviceFailure,
    Acknowledge,
    ServerDeviceBusy,
    MemoryParityError,
    GatewayPathUnavailable,
    GatewayTargetFailedToRespond,
    /// The bootloader is asleep; send Wake first
    WakeRequired,
    BadCommand,
    CrcMismatch,
    BadOffset,
    BadData,
    /// Any code outside the known set
    Unrecognized(u8),
}

impl DeviceException {
    /// Map an exception byte to its kind
    pub fn from_code(code: u8) -> Self {
        match code {
            ILLEGAL_FUNCTION => DeviceException::IllegalFunction,
            ILLEGAL_DATA_ADDRESS => DeviceException::IllegalDataAddress,
            ILLEGAL_DATA_VALUE => DeviceException::IllegalDataValue,
            SERVER_DEVICE_FAILURE => DeviceException::ServerDeviceFailure,
            ACKNOWLEDGE => DeviceException::Acknowledge,
            SERVER_DEVICE_BUSY => DeviceException::ServerDeviceBusy,
            MEMORY_PARITY_ERROR => DeviceException::MemoryParityError,
            GATEWAY_PATH_UNAVAILABLE => DeviceException::GatewayPathUnavailable,
            GATEWAY_TARGET_FAILED_TO_RESPOND => DeviceException::GatewayTargetFailedToRespond,
            WAKE_REQUIRED => DeviceException::WakeRequired,
            BAD_COMMAND => DeviceException::BadCommand,
            CRC_MISMATCH => DeviceException::CrcMismatch,
            BAD_OFFSET => DeviceException::BadOffset,
            BAD_DATA => DeviceException::BadData,
            other => DeviceException::Unrecognized(other),
        }
    }

    /// Wire byte of this exception
    pub fn code(&self) -> u8 {
        match *self {
            DeviceException::IllegalFunction => ILLEGAL_FUNCTION,
            DeviceException::IllegalDataAddress => ILLEGAL_DATA_ADDRESS,
            DeviceException::IllegalDataValue => ILLEGAL_DATA_VALUE,
            DeviceException::ServerDeviceFailure => SERVER_DEVICE_FAILURE,
            DeviceException::Acknowledge => ACKNOWLEDGE,
            DeviceException::ServerDeviceBusy => SERVER_DEVICE_BUSY,
            DeviceException::MemoryParityError => MEMORY_PARITY_ERROR,
            DeviceException::GatewayPathUnavailable => GATEWAY_PATH_UNAVAILABLE,
            DeviceException::GatewayTargetFailedToRespond => GATEWAY_TARGET_FAILED_TO_RESPOND,
            DeviceException::WakeRequired => WAKE_REQUIRED,
            DeviceException::BadCommand => BAD_COMMAND,
            DeviceException::CrcMismatch => CRC_MISMATCH,
            DeviceException::BadOffset => BAD_OFFSET,
            DeviceException::BadData => BAD_DATA,
            DeviceException::Unrecognized(code) => code,
        }
    }

    pub fn is_wake_required(&self) -> bool {
        matches!(self, DeviceException::WakeRequired)
    }

    fn description(&self) -> &'static str {
        match self {
            DeviceException::IllegalFunction => "illegal function",
            DeviceException::IllegalDataAddress => "illegal data address",
            DeviceException::IllegalDataValue => "illegal data value",
            DeviceException::ServerDeviceFailure => "server device failure",
            DeviceException::Acknowledge => "request acknowledged",
            DeviceException::ServerDeviceBusy => "server device busy",
            DeviceException::MemoryParityError => "memory parity error",
            DeviceException::GatewayPathUnavailable => "gateway path unavailable",
            DeviceException::GatewayTargetFailedToRespond => {
                "gateway target device failed to respond"
            }
            DeviceException::WakeRequired => "bootloader wake required",
            DeviceException::BadCommand => "bad bootloader command",
            DeviceException::CrcMismatch => "CRC mismatch",
            DeviceException::BadOffset => "bad offset",
            DeviceException::BadData => "bad data",
            DeviceException::Unrecognized(_) => "unrecognized device error",
        }
    }
}

impl From<u8> for DeviceException {
    fn from(code: u8) -> Self {
        DeviceException::from_code(code)
    }
}

impl std::error::Error for DeviceException {}

impl fmt::Display for DeviceException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {:#04x})", self.description(), self.code())
    }
}
