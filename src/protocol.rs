use crate::codec::{offset_field, strip_status, zero_span};
use crate::commands::{BootloaderCommand, FrameStyle};
use crate::config::ClientConfig;
use crate::constants::{EXCEPTION_BIT, OFFSET_LIMIT};
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{BootloaderError, ProtocolError, Result};
use crate::exception::DeviceException;
use crate::transport::{Pdu, Transport};
use crate::types::*;
use log::{debug, trace};
use std::sync::{Arc, Mutex, PoisonError};

/// Main bootloader protocol interface.
///
/// Every operation runs as one transaction under the client's lock, so a
/// client can be shared between threads (wrap it in an `Arc`) and requests
/// never interleave on the transport.
pub struct BootloaderClient<T> {
    transport: Mutex<T>,
    config: ClientConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<T: Transport> BootloaderClient<T> {
    /// Create a client with the default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        BootloaderClient {
            transport: Mutex::new(transport),
            config,
            diagnostics: Arc::new(LogSink),
        }
    }

    /// Route warnings and identity notes somewhere other than `log`
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Give back the transport
    pub fn into_inner(self) -> T {
        self.transport.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one request/response cycle and decode its success payload.
    ///
    /// The transport lock is held from building the request until `decode`
    /// returns, and released on every exit path when the guard drops.
    fn transact<R>(
        &self,
        function_code: u8,
        payload: Vec<u8>,
        decode: impl FnOnce(Vec<u8>) -> Result<R>,
    ) -> Result<R> {
        let mut transport = self.transport.lock().unwrap_or_else(PoisonError::into_inner);

        let request = Pdu::new(self.config.unit_id, function_code, payload);
        trace!(
            "TX unit={} fc={:#04x} {:02X?}",
            request.unit_id,
            request.function_code,
            request.payload
        );

        let response = transport.submit(&request)?;
        trace!(
            "RX unit={} fc={:#04x} {:02X?}",
            response.unit_id,
            response.function_code,
            response.payload
        );

        let payload = self.classify(&request, response)?;
        decode(payload)
    }

    /// Split a response into success payload, device exception or protocol violation
    fn classify(&self, request: &Pdu, response: Pdu) -> Result<Vec<u8>> {
        if response.function_code == request.function_code {
            return Ok(response.payload);
        }

        if response.function_code == request.function_code | EXCEPTION_BIT {
            return match response.payload.as_slice() {
                [code] => Err(DeviceException::from_code(*code).into()),
                other => Err(ProtocolError::MalformedException { length: other.len() }.into()),
            };
        }

        self.diagnostics.warning(&format!(
            "unexpected response code ({:#04x}) to request code {:#04x}",
            response.function_code, request.function_code
        ));
        Err(ProtocolError::UnexpectedFunctionCode {
            expected: request.function_code,
            actual: response.function_code,
        }
        .into())
    }

    /// Send a sub-command with pre-encoded arguments, returning the success payload
    fn command(&self, command: BootloaderCommand, args: &[u8]) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(1 + args.len());
        payload.push(command.as_byte());
        payload.extend_from_slice(args);
        self.transact(self.config.bootloader_function_code, payload, Ok)
    }

    /// Send an argument-less sub-command framed per the configured style
    fn bare_command(&self, command: BootloaderCommand) -> Result<Vec<u8>> {
        debug!("Sending {} command", command);
        let span = zero_span();
        let args: &[u8] = match self.config.frame_style {
            FrameStyle::Canonical => &span,
            FrameStyle::Legacy => &[],
        };
        self.command(command, args)
    }

    /// Wake the resident bootloader
    pub fn wake(&self) -> Result<()> {
        self.bare_command(BootloaderCommand::Wake).map(|_| ())
    }

    /// Erase the application area
    pub fn erase_app(&self) -> Result<()> {
        self.bare_command(BootloaderCommand::EraseApp).map(|_| ())
    }

    /// Ask the device to confirm the application area is blank
    pub fn blank_check(&self) -> Result<()> {
        self.bare_command(BootloaderCommand::BlankCheck).map(|_| ())
    }

    /// Ask the device to validate the written application
    pub fn validate_app(&self) -> Result<()> {
        self.bare_command(BootloaderCommand::ValidateApp).map(|_| ())
    }

    /// Reset the device
    pub fn reset(&self) -> Result<()> {
        self.bare_command(BootloaderCommand::Reset).map(|_| ())
    }

    /// Announce the start of an application write sequence
    pub fn init_write_app(&self) -> Result<()> {
        self.bare_command(BootloaderCommand::InitWriteApp).map(|_| ())
    }

    /// Close an application write sequence
    pub fn finish_write_app(&self) -> Result<()> {
        self.bare_command(BootloaderCommand::FinishWriteApp).map(|_| ())
    }

    /// Read the bootloader info block
    pub fn bootloader_info(&self) -> Result<BootloaderInfo> {
        let raw = self.bare_command(BootloaderCommand::BootloaderInfo)?;
        Ok(BootloaderInfo { raw })
    }

    /// Query the device identity.
    ///
    /// Uses the identify function code with an empty payload; the response
    /// payload is the identity, returned as-is.
    pub fn ident(&self) -> Result<DeviceIdentity> {
        let identity = self.transact(self.config.ident_function_code, Vec::new(), |payload| {
            Ok(DeviceIdentity::new(payload))
        })?;
        self.diagnostics.info(&format!("device identity: {}", identity));
        Ok(identity)
    }

    /// Write firmware bytes at `offset`.
    ///
    /// Wire layout: sub-command, 3-byte offset, 1-byte `length`, then `data`.
    /// `data.len()` is not checked against `length`; keeping them equal is
    /// the caller's job. Only the low 24 bits of `offset` are sent.
    pub fn write_app(&self, data: &[u8], offset: u32, length: u8) -> Result<()> {
        debug!("Writing {} bytes at {:#08x}", length, offset);
        let mut args = Vec::with_capacity(4 + data.len());
        args.extend_from_slice(&offset_field(offset));
        args.push(length);
        args.extend_from_slice(data);
        self.command(BootloaderCommand::WriteApp, &args).map(|_| ())
    }

    /// Read `length` firmware bytes from `offset`.
    ///
    /// The first response byte is a status echo and is stripped; an empty
    /// response is a protocol error.
    pub fn read_app(&self, offset: u32, length: u8) -> Result<Vec<u8>> {
        debug!("Reading {} bytes at {:#08x}", length, offset);
        let [o0, o1, o2] = offset_field(offset);
        let payload = vec![BootloaderCommand::ReadApp.as_byte(), o0, o1, o2, length];
        self.transact(self.config.bootloader_function_code, payload, |response| {
            strip_status(&response).map(<[u8]>::to_vec)
        })
    }

    /// Send any sub-command with caller-encoded arguments, returning the raw success payload.
    ///
    /// Covers the filespec commands, which have no dedicated wrapper.
    pub fn raw_command(&self, command: BootloaderCommand, args: &[u8]) -> Result<Vec<u8>> {
        self.command(command, args)
    }

    /// Write a whole image starting at `start_offset`, one WriteApp per chunk.
    ///
    /// Each chunk is its own transaction; other callers sharing the client
    /// may slip requests in between chunks.
    pub fn write_image(
        &self,
        image: &[u8],
        start_offset: u32,
        mut progress: impl FnMut(TransferProgress),
    ) -> Result<()> {
        check_span(start_offset, image.len())?;
        let chunk_len = self.config.effective_chunk_len();
        let mut done = 0usize;

        for chunk in image.chunks(chunk_len) {
            let offset = start_offset + done as u32;
            self.write_app(chunk, offset, chunk.len() as u8)?;
            done += chunk.len();
            progress(TransferProgress {
                offset,
                done,
                total: image.len(),
            });
        }

        Ok(())
    }

    /// Read `length` bytes starting at `start_offset`, one ReadApp per chunk
    pub fn read_image(
        &self,
        start_offset: u32,
        length: usize,
        mut progress: impl FnMut(TransferProgress),
    ) -> Result<Vec<u8>> {
        check_span(start_offset, length)?;
        let chunk_len = self.config.effective_chunk_len();
        let mut image = Vec::with_capacity(length);

        while image.len() < length {
            let offset = start_offset + image.len() as u32;
            let wanted = chunk_len.min(length - image.len());
            let data = self.read_app(offset, wanted as u8)?;
            if data.len() != wanted {
                return Err(ProtocolError::ShortRead {
                    expected: wanted,
                    actual: data.len(),
                }
                .into());
            }
            image.extend_from_slice(&data);
            progress(TransferProgress {
                offset,
                done: image.len(),
                total: length,
            });
        }

        Ok(image)
    }

    /// Run `op`; if the device answers WakeRequired, wake it and run `op` once more
    pub fn with_wake<R>(&self, op: impl Fn(&Self) -> Result<R>) -> Result<R> {
        match op(self) {
            Err(err) if err.device_exception().is_some_and(|e| e.is_wake_required()) => {
                debug!("Device asleep, waking and retrying");
                self.wake()?;
                op(self)
            }
            other => other,
        }
    }
}

/// Reject transfers whose last byte lies past the 24-bit offset field
fn check_span(offset: u32, length: usize) -> Result<()> {
    if offset as u64 + length as u64 > OFFSET_LIMIT as u64 {
        return Err(BootloaderError::OffsetOutOfRange { offset, length });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use std::collections::VecDeque;

    /// Replays canned responses and records every request
    #[derive(Default)]
    struct Scripted {
        responses: VecDeque<std::result::Result<Pdu, TransportError>>,
        requests: Vec<Pdu>,
    }

    impl Scripted {
        fn reply(mut self, function_code: u8, payload: &[u8]) -> Self {
            self.responses.push_back(Ok(Pdu::new(1, function_code, payload.to_vec())));
            self
        }
    }

    impl Transport for Scripted {
        fn submit(&mut self, request: &Pdu) -> std::result::Result<Pdu, TransportError> {
            self.requests.push(request.clone());
            self.responses.pop_front().unwrap_or(Err(TransportError::Timeout))
        }
    }

    #[test]
    fn canonical_wake_carries_zero_span() {
        let client = BootloaderClient::new(Scripted::default().reply(0x41, &[]));
        client.wake().unwrap();
        let transport = client.into_inner();
        assert_eq!(transport.requests[0].payload, vec![255, 0, 0, 0, 0]);
        assert_eq!(transport.requests[0].function_code, 0x41);
        assert_eq!(transport.requests[0].unit_id, 1);
    }

    #[test]
    fn legacy_erase_is_bare_sub_command() {
        let config = ClientConfig::default().with_frame_style(FrameStyle::Legacy);
        let client = BootloaderClient::with_config(Scripted::default().reply(0x41, &[]), config);
        client.erase_app().unwrap();
        assert_eq!(client.into_inner().requests[0].payload, vec![2]);
    }

    #[test]
    fn exception_echo_maps_code() {
        let client = BootloaderClient::new(Scripted::default().reply(0xC1, &[252]));
        let err = client.erase_app().unwrap_err();
        assert_eq!(err.device_exception(), Some(DeviceException::BadOffset));
    }

    #[test]
    fn exception_echo_with_wrong_length_is_protocol_error() {
        let client = BootloaderClient::new(Scripted::default().reply(0xC1, &[252, 0]));
        let err = client.blank_check().unwrap_err();
        assert!(matches!(
            err,
            BootloaderError::Protocol(ProtocolError::MalformedException { length: 2 })
        ));
    }

    #[test]
    fn transport_error_passes_through() {
        let client = BootloaderClient::new(Scripted::default());
        let err = client.wake().unwrap_err();
        assert!(matches!(err, BootloaderError::Transport(TransportError::Timeout)));
    }

    #[test]
    fn write_app_layout() {
        let client = BootloaderClient::new(Scripted::default().reply(0x41, &[]));
        client.write_app(&[0xDE, 0xAD], 0x0012_3456, 2).unwrap();
        assert_eq!(
            client.into_inner().requests[0].payload,
            vec![4, 0x12, 0x34, 0x56, 2, 0xDE, 0xAD]
        );
    }

    #[test]
    fn read_app_strips_status_byte() {
        let client = BootloaderClient::new(Scripted::default().reply(0x41, &[3, 10, 20, 30]));
        assert_eq!(client.read_app(0x100, 3).unwrap(), vec![10, 20, 30]);
        assert_eq!(
            client.into_inner().requests[0].payload,
            vec![3, 0x00, 0x01, 0x00, 3]
        );
    }

    #[test]
    fn ident_returns_payload_verbatim() {
        let client = BootloaderClient::new(Scripted::default().reply(0x42, b"BL-1.2\x00"));
        let identity = client.ident().unwrap();
        assert_eq!(identity.as_bytes(), b"BL-1.2\x00");
        let request = &client.into_inner().requests[0];
        assert_eq!(request.function_code, 0x42);
        assert!(request.payload.is_empty());
    }

    #[test]
    fn with_wake_retries_once() {
        let transport = Scripted::default()
            .reply(0xC1, &[0xFF])
            .reply(0x41, &[])
            .reply(0x41, &[]);
        let client = BootloaderClient::new(transport);
        client.with_wake(|c| c.erase_app()).unwrap();
        let requests = client.into_inner().requests;
        let commands: Vec<u8> = requests.iter().map(|r| r.payload[0]).collect();
        assert_eq!(commands, vec![2, 255, 2]);
    }

    #[test]
    fn span_check_rejects_overflow() {
        assert!(check_span(0x00FF_FF00, 0x100).is_ok());
        assert!(matches!(
            check_span(0x00FF_FF00, 0x101),
            Err(BootloaderError::OffsetOutOfRange { .. })
        ));
    }
}
