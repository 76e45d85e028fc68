//! Byte builder for unit tests.
//!
//! The crate only decodes; tests need the matching encodings to build input.

use crate::varint::{MAX_FOUR_BYTE, MAX_ONE_BYTE, MAX_TWO_BYTE};

#[derive(Default)]
pub(crate) struct KernelWriter {
    bytes: Vec<u8>,
}

impl KernelWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn byte(mut self, byte: u8) -> Self {
        self.bytes.push(byte);
        self
    }

    pub(crate) fn fixed_u32(mut self, value: u32) -> Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub(crate) fn uint(mut self, value: u32) -> Self {
        push_uint(&mut self.bytes, value);
        self
    }

    /// Encodes a real position with the +1 bias.
    pub(crate) fn position(self, position: u32) -> Self {
        self.uint(position + 1)
    }

    /// Encodes the "no source" position.
    pub(crate) fn no_position(self) -> Self {
        self.uint(0)
    }

    pub(crate) fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

pub(crate) fn encode_uint(value: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    push_uint(&mut bytes, value);
    bytes
}

fn push_uint(bytes: &mut Vec<u8>, value: u32) {
    if value <= MAX_ONE_BYTE {
        bytes.push(value as u8);
    } else if value <= MAX_TWO_BYTE {
        bytes.push(((value >> 8) as u8) | 0x80);
        bytes.push(value as u8);
    } else {
        assert!(value <= MAX_FOUR_BYTE, "{value} does not fit the kernel uint encoding");
        let [b0, b1, b2, b3] = value.to_be_bytes();
        bytes.extend_from_slice(&[b0 | 0xC0, b1, b2, b3]);
    }
}
