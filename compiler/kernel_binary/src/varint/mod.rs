//! Prefix-tagged variable-width unsigned integers.
//!
//! The two most significant bits of the first byte select the width:
//!
//! ```text
//! 0xxxxxxx                            1 byte,  0..=127
//! 10xxxxxx xxxxxxxx                   2 bytes, 0..=16383
//! 11xxxxxx xxxxxxxx xxxxxxxx xxxxxxxx 4 bytes, 0..=2^30-1
//! ```
//!
//! Multi-byte forms are big-endian after the prefix bits are cleared.

/// Largest value of the 1-byte form.
pub const MAX_ONE_BYTE: u32 = 0x7F;

/// Largest value of the 2-byte form.
pub const MAX_TWO_BYTE: u32 = 0x3FFF;

/// Largest value of the 4-byte form (and of the encoding as a whole).
pub const MAX_FOUR_BYTE: u32 = 0x3FFF_FFFF;

/// Number of bytes the encoding starting with `first` occupies.
#[inline]
pub const fn encoded_len(first: u8) -> usize {
    if first & 0x80 == 0 {
        1
    } else if first & 0xC0 == 0x80 {
        2
    } else {
        4
    }
}

/// Decode one value from the front of `bytes`.
///
/// Returns the value and the number of bytes it occupied, or `None` when
/// `bytes` is empty or shorter than the width the first byte selects.
#[inline]
pub fn decode_uint(bytes: &[u8]) -> Option<(u32, usize)> {
    let &first = bytes.first()?;
    match encoded_len(first) {
        1 => Some((u32::from(first), 1)),
        2 => {
            let &[_, b1, ..] = bytes else {
                return None;
            };
            let value = (u32::from(first & !0x80) << 8) | u32::from(b1);
            Some((value, 2))
        }
        _ => {
            let &[_, b1, b2, b3, ..] = bytes else {
                return None;
            };
            let value = u32::from_be_bytes([first & !0xC0, b1, b2, b3]);
            Some((value, 4))
        }
    }
}
