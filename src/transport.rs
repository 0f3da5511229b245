//! Boundary to the link layer that moves PDUs.
//!
//! Framing, checksums and link-level retries belong to the implementor.
//! The transaction layer only needs "submit this request, hand me the
//! response".

use crate::constants::EXCEPTION_BIT;
use crate::error::TransportError;

/// Function code plus payload, addressed to one unit on the link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    pub unit_id: u8,
    pub function_code: u8,
    pub payload: Vec<u8>,
}

impl Pdu {
    pub fn new(unit_id: u8, function_code: u8, payload: Vec<u8>) -> Self {
        Pdu {
            unit_id,
            function_code,
            payload,
        }
    }

    /// Exception echo for `function_code` carrying `code`
    pub fn exception(unit_id: u8, function_code: u8, code: u8) -> Self {
        Pdu::new(unit_id, function_code | EXCEPTION_BIT, vec![code])
    }

    pub fn is_exception(&self) -> bool {
        self.function_code & EXCEPTION_BIT != 0
    }
}

/// A link able to exchange one request for one response.
///
/// Implementations need not be thread-safe; the client serializes every
/// call behind its own lock.
pub trait Transport {
    /// Send `request` and block until the matching response or a link failure
    fn submit(&mut self, request: &Pdu) -> Result<Pdu, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn submit(&mut self, request: &Pdu) -> Result<Pdu, TransportError> {
        (**self).submit(request)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn submit(&mut self, request: &Pdu) -> Result<Pdu, TransportError> {
        (**self).submit(request)
    }
}
