//! The single unrecoverable decode outcome.

use crate::Tag;

/// Failure of a kernel decode pass.
///
/// None of these are recoverable: the format carries no resynchronization
/// markers, so any detected corruption invalidates the rest of the buffer.
/// Every variant carries the offset at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Fewer bytes remain than the requested primitive consumes.
    #[error("unexpected end of kernel data: need {needed} byte(s) at offset {offset}, size {size}")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        size: usize,
    },

    /// The pass finished without consuming the whole buffer.
    #[error("expected to be at end of kernel data (offset: {offset}, size: {size})")]
    TrailingBytes { offset: usize, size: usize },

    /// A framing tag was not the one the grammar requires here.
    #[error("unexpected tag at offset {offset}: expected {expected}, found {found:?}")]
    UnexpectedTag {
        offset: usize,
        expected: &'static str,
        found: Tag,
    },

    /// A tag byte with no assigned node kind.
    #[error("unknown tag byte 0x{byte:02X} at offset {offset}")]
    UnknownTag { offset: usize, byte: u8 },

    /// The leading program file magic did not match.
    #[error("not a kernel program file: magic 0x{found:08X}, expected 0x90ABCDEF")]
    BadMagic { found: u32 },

    /// An explicit reposition past the end of the buffer.
    #[error("offset {offset} is outside kernel data of size {size}")]
    OffsetOutOfRange { offset: usize, size: usize },
}

impl DecodeError {
    /// Offset at which the failure was detected, when it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::UnexpectedEnd { offset, .. }
            | DecodeError::TrailingBytes { offset, .. }
            | DecodeError::UnexpectedTag { offset, .. }
            | DecodeError::UnknownTag { offset, .. }
            | DecodeError::OffsetOutOfRange { offset, .. } => Some(*offset),
            DecodeError::BadMagic { .. } => None,
        }
    }
}

/// Result alias used by every decode primitive.
pub type Result<T> = std::result::Result<T, DecodeError>;
