#![allow(dead_code)]

use modbus_bootloader::{DiagnosticSink, Pdu, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BL_FC: u8 = 0x41;
pub const IDENT_FC: u8 = 0x42;

/// Replays queued responses in order and records every request it sees.
/// Once the queue runs dry it echoes the request's function code with an
/// empty payload.
#[derive(Default)]
pub struct StubTransport {
    pub responses: VecDeque<Result<Pdu, TransportError>>,
    pub requests: Vec<Pdu>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, function_code: u8, payload: &[u8]) -> Self {
        self.responses.push_back(Ok(Pdu::new(1, function_code, payload.to_vec())));
        self
    }

    pub fn fail(mut self, error: TransportError) -> Self {
        self.responses.push_back(Err(error));
        self
    }
}

impl Transport for StubTransport {
    fn submit(&mut self, request: &Pdu) -> Result<Pdu, TransportError> {
        self.requests.push(request.clone());
        match self.responses.pop_front() {
            Some(response) => response,
            None => Ok(Pdu::new(request.unit_id, request.function_code, Vec::new())),
        }
    }
}

/// Counts warnings and keeps the last message of each kind
#[derive(Default)]
pub struct CountingSink {
    pub warnings: AtomicUsize,
    pub infos: AtomicUsize,
    pub last_warning: Mutex<Option<String>>,
    pub last_info: Mutex<Option<String>>,
}

impl CountingSink {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    pub fn infos(&self) -> usize {
        self.infos.load(Ordering::SeqCst)
    }
}

impl DiagnosticSink for CountingSink {
    fn warning(&self, message: &str) {
        self.warnings.fetch_add(1, Ordering::SeqCst);
        *self.last_warning.lock().unwrap() = Some(message.to_string());
    }

    fn info(&self, message: &str) {
        self.infos.fetch_add(1, Ordering::SeqCst);
        *self.last_info.lock().unwrap() = Some(message.to_string());
    }
}
