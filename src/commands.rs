//! Bootloader sub-command identifiers.
//!
//! The sub-command byte is the first payload byte of every request sent
//! under the bootloader function code. The values are a wire contract.

use crate::error::BootloaderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-command selector carried inside the bootloader function code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BootloaderCommand {
    WriteFilespec = 1,
    EraseApp = 2,
    ReadApp = 3,
    WriteApp = 4,
    ValidateApp = 5,
    Reset = 6,
    BootloaderInfo = 7,
    BlankCheck = 8,
    ReadFilespec = 9,
    InitWriteApp = 10,
    FinishWriteApp = 11,
    Wake = 255,
}

impl BootloaderCommand {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for BootloaderCommand {
    type Error = BootloaderError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            1 => Ok(BootloaderCommand::WriteFilespec),
            2 => Ok(BootloaderCommand::EraseApp),
            3 => Ok(BootloaderCommand::ReadApp),
            4 => Ok(BootloaderCommand::WriteApp),
            5 => Ok(BootloaderCommand::ValidateApp),
            6 => Ok(BootloaderCommand::Reset),
            7 => Ok(BootloaderCommand::BootloaderInfo),
            8 => Ok(BootloaderCommand::BlankCheck),
            9 => Ok(BootloaderCommand::ReadFilespec),
            10 => Ok(BootloaderCommand::InitWriteApp),
            11 => Ok(BootloaderCommand::FinishWriteApp),
            255 => Ok(BootloaderCommand::Wake),
            other => Err(BootloaderError::UnknownCommand(other)),
        }
    }
}

impl fmt::Display for BootloaderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BootloaderCommand::WriteFilespec => "write-filespec",
            BootloaderCommand::EraseApp => "erase-app",
            BootloaderCommand::ReadApp => "read-app",
            BootloaderCommand::WriteApp => "write-app",
            BootloaderCommand::ValidateApp => "validate-app",
            BootloaderCommand::Reset => "reset",
            BootloaderCommand::BootloaderInfo => "bootloader-info",
            BootloaderCommand::BlankCheck => "blank-check",
            BootloaderCommand::ReadFilespec => "read-filespec",
            BootloaderCommand::InitWriteApp => "init-write-app",
            BootloaderCommand::FinishWriteApp => "finish-write-app",
            BootloaderCommand::Wake => "wake",
        };
        f.write_str(name)
    }
}

/// Request shape for commands that take no arguments (wake, erase, blank check...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    /// Sub-command byte followed by a zero 16-bit offset and a zero 16-bit length
    #[default]
    Canonical,
    /// Sub-command byte only
    Legacy,
}
