//! In-memory bootloader used by the demo programs.

use log::debug;
use modbus_bootloader::codec::decode_offset_field;
use modbus_bootloader::constants::exceptions::*;
use modbus_bootloader::{BootloaderCommand, ClientConfig, Pdu, Transport, TransportError};

pub struct SimulatedDevice {
    config: ClientConfig,
    identity: Vec<u8>,
    flash: Vec<u8>,
    awake: bool,
}

impl SimulatedDevice {
    pub fn new(config: ClientConfig, flash_size: usize) -> Self {
        SimulatedDevice {
            config,
            identity: b"SIM-BL 1.0".to_vec(),
            flash: vec![0xFF; flash_size],
            awake: false,
        }
    }

    fn range(&self, payload: &[u8]) -> Option<(usize, usize)> {
        let offset = decode_offset_field(payload.get(1..)?)? as usize;
        let length = *payload.get(4)? as usize;
        (offset + length <= self.flash.len()).then_some((offset, length))
    }

    fn handle(&mut self, payload: &[u8]) -> Result<Vec<u8>, u8> {
        let command = payload
            .first()
            .copied()
            .and_then(|b| BootloaderCommand::try_from(b).ok())
            .ok_or(BAD_COMMAND)?;
        debug!("simulated device handling {}", command);

        if !self.awake && command != BootloaderCommand::Wake {
            return Err(WAKE_REQUIRED);
        }

        match command {
            BootloaderCommand::Wake => {
                self.awake = true;
                Ok(Vec::new())
            }
            BootloaderCommand::EraseApp => {
                self.flash.fill(0xFF);
                Ok(Vec::new())
            }
            BootloaderCommand::BlankCheck => {
                if self.flash.iter().all(|&b| b == 0xFF) {
                    Ok(Vec::new())
                } else {
                    Err(BAD_DATA)
                }
            }
            BootloaderCommand::WriteApp => {
                let (offset, length) = self.range(payload).ok_or(BAD_OFFSET)?;
                let data = payload.get(5..).filter(|d| d.len() == length).ok_or(BAD_DATA)?;
                self.flash[offset..offset + length].copy_from_slice(data);
                Ok(Vec::new())
            }
            BootloaderCommand::ReadApp => {
                let (offset, length) = self.range(payload).ok_or(BAD_OFFSET)?;
                let mut response = vec![command.as_byte()];
                response.extend_from_slice(&self.flash[offset..offset + length]);
                Ok(response)
            }
            BootloaderCommand::Reset => {
                self.awake = false;
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        }
    }
}

impl Transport for SimulatedDevice {
    fn submit(&mut self, request: &Pdu) -> Result<Pdu, TransportError> {
        if request.unit_id != self.config.unit_id {
            return Err(TransportError::Timeout);
        }

        if request.function_code == self.config.ident_function_code {
            return Ok(Pdu::new(request.unit_id, request.function_code, self.identity.clone()));
        }

        if request.function_code != self.config.bootloader_function_code {
            return Ok(Pdu::exception(request.unit_id, request.function_code, ILLEGAL_FUNCTION));
        }

        Ok(match self.handle(&request.payload) {
            Ok(payload) => Pdu::new(request.unit_id, request.function_code, payload),
            Err(code) => Pdu::exception(request.unit_id, request.function_code, code),
        })
    }
}
