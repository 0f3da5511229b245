//! Big-endian field encoding for bootloader requests and responses.
//!
//! All fields are unsigned. Encoders are total over their bit width;
//! values that do not fit a narrower wire field are the caller's problem
//! and get truncated, not rejected.

use crate::error::{ProtocolError, Result};

/// Encode a 16-bit value, most significant byte first
pub fn encode_u16_be(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode a 32-bit value, high word first, each word big-endian
pub fn encode_u32_be(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Decode the first two bytes of `bytes`
pub fn decode_u16_be(bytes: &[u8]) -> Option<u16> {
    match bytes {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Decode the first four bytes of `bytes`
pub fn decode_u32_be(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b, c, d, ..] => Some(u32::from_be_bytes([*a, *b, *c, *d])),
        _ => None,
    }
}

/// 3-byte offset field: the low three bytes of `offset`, most significant first.
///
/// Offsets of 2^24 and above lose their top byte.
pub fn offset_field(offset: u32) -> [u8; 3] {
    let [_, hi, mid, lo] = encode_u32_be(offset);
    [hi, mid, lo]
}

/// Inverse of [`offset_field`]
pub fn decode_offset_field(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [hi, mid, lo, ..] => Some(u32::from_be_bytes([0, *hi, *mid, *lo])),
        _ => None,
    }
}

/// Zero offset followed by zero length, both 16-bit
pub fn zero_span() -> [u8; 4] {
    let [o0, o1] = encode_u16_be(0);
    let [l0, l1] = encode_u16_be(0);
    [o0, o1, l0, l1]
}

/// Drop the leading status byte of a read response
pub fn strip_status(payload: &[u8]) -> Result<&[u8]> {
    match payload.split_first() {
        Some((_status, data)) => Ok(data),
        None => Err(ProtocolError::MissingStatusByte.into()),
    }
}
