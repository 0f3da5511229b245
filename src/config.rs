//! Client configuration.

use crate::commands::FrameStyle;
use crate::constants::*;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Addressing and framing parameters of a bootloader client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Unit identifier of the target device
    pub unit_id: u8,
    /// Function code carrying the bootloader sub-commands
    pub bootloader_function_code: u8,
    /// Function code of the identify request
    pub ident_function_code: u8,
    /// Request shape of argument-less commands
    pub frame_style: FrameStyle,
    /// Largest block sent per WriteApp/ReadApp in image transfers
    pub max_chunk_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            unit_id: DEFAULT_UNIT_ID,
            bootloader_function_code: DEFAULT_BOOTLOADER_FUNCTION_CODE,
            ident_function_code: DEFAULT_IDENT_FUNCTION_CODE,
            frame_style: FrameStyle::Canonical,
            max_chunk_len: MAX_CHUNK_LEN,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON document; absent fields take their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_unit_id(mut self, unit_id: u8) -> Self {
        self.unit_id = unit_id;
        self
    }

    pub fn with_function_codes(mut self, bootloader: u8, ident: u8) -> Self {
        self.bootloader_function_code = bootloader;
        self.ident_function_code = ident;
        self
    }

    pub fn with_frame_style(mut self, frame_style: FrameStyle) -> Self {
        self.frame_style = frame_style;
        self
    }

    pub fn with_max_chunk_len(mut self, max_chunk_len: usize) -> Self {
        self.max_chunk_len = max_chunk_len;
        self
    }

    /// Chunk length actually used, within what the 1-byte length field allows
    pub fn effective_chunk_len(&self) -> usize {
        self.max_chunk_len.clamp(1, MAX_CHUNK_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.unit_id, 1);
        assert_eq!(config.bootloader_function_code, 0x41);
        assert_eq!(config.ident_function_code, 0x42);
        assert_eq!(config.frame_style, FrameStyle::Canonical);
        assert_eq!(config.effective_chunk_len(), 255);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "unit_id": 17, "frame_style": "legacy" }"#;
        let config = ClientConfig::from_json(json).unwrap();
        assert_eq!(config.unit_id, 17);
        assert_eq!(config.frame_style, FrameStyle::Legacy);
        assert_eq!(config.bootloader_function_code, DEFAULT_BOOTLOADER_FUNCTION_CODE);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let err = ClientConfig::from_json("{ unit_id: ").unwrap_err();
        assert!(matches!(err, crate::BootloaderError::Config(_)));
    }

    #[test]
    fn chunk_len_is_clamped() {
        assert_eq!(ClientConfig::default().with_max_chunk_len(0).effective_chunk_len(), 1);
        assert_eq!(ClientConfig::default().with_max_chunk_len(4096).effective_chunk_len(), 255);
        assert_eq!(ClientConfig::default().with_max_chunk_len(64).effective_chunk_len(), 64);
    }
}
