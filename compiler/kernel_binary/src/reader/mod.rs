//! Ordered cursor over a borrowed kernel buffer.
//!
//! The reader is a dumb cursor: it never enforces the grammar, it only decodes
//! the next primitive the caller asks for. Every read checks bounds first and
//! fails without advancing, so a failed read produces no partial value.

use bitflags::Flags;

use crate::position::{PositionRange, PositionScope, TokenPosition};
use crate::tag::split_tag_byte;
use crate::{varint, DecodeError, NameIndex, Result, Tag};

/// Cursor over one kernel buffer.
///
/// Holds the read offset and the running [`PositionRange`] of decoded
/// positions. One reader serves one decode pass; the underlying buffer can be
/// shared read-only between independent readers.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
    positions: PositionRange,
    current_script_id: Option<u32>,
}

impl<'a> Reader<'a> {
    /// Create a reader at offset 0 with an unset position aggregate.
    pub fn new(buf: &'a [u8]) -> Self {
        Reader {
            buf,
            offset: 0,
            positions: PositionRange::UNSET,
            current_script_id: None,
        }
    }

    // === Cursor ===

    /// Current read offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Reposition the cursor, e.g. to re-enter a region through an offset table.
    ///
    /// Offsets up to and including [`size()`](Self::size) are valid.
    pub fn set_offset(&mut self, offset: usize) -> Result<()> {
        if offset > self.buf.len() {
            return Err(DecodeError::OffsetOutOfRange {
                offset,
                size: self.buf.len(),
            });
        }
        tracing::trace!(from = self.offset, to = offset, "reposition kernel reader");
        self.offset = offset;
        Ok(())
    }

    /// Total buffer length.
    #[inline]
    pub fn size(&self) -> usize {
        self.buf.len()
    }

    /// Bytes left after the cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// The whole underlying buffer, independent of the cursor.
    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Script that positions decoded from here on belong to.
    #[inline]
    pub fn current_script_id(&self) -> Option<u32> {
        self.current_script_id
    }

    #[inline]
    pub fn set_current_script_id(&mut self, script_id: Option<u32>) {
        self.current_script_id = script_id;
    }

    /// Fail unless the cursor sits exactly at the end of the buffer.
    ///
    /// Called after a complete top-level pass; leftover bytes mean a
    /// malformed or version-mismatched input.
    pub fn ensure_end(&self) -> Result<()> {
        if self.offset == self.buf.len() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes {
                offset: self.offset,
                size: self.buf.len(),
            })
        }
    }

    /// The next `count` bytes, borrowed from the buffer.
    ///
    /// The caller interprets them (raw instruction bytes, string payloads).
    pub fn consume(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.offset += count;
        Ok(bytes)
    }

    fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        self.buf
            .get(self.offset..)
            .and_then(|rest| rest.get(..count))
            .ok_or_else(|| self.unexpected_end(count))
    }

    fn unexpected_end(&self, needed: usize) -> DecodeError {
        DecodeError::UnexpectedEnd {
            offset: self.offset,
            needed,
            size: self.buf.len(),
        }
    }

    // === Fixed-Width Primitives ===

    /// One byte, advancing past it.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.offset += 1;
        Ok(byte)
    }

    /// One byte, without advancing.
    #[inline]
    pub fn peek_byte(&self) -> Result<u8> {
        self.buf
            .get(self.offset)
            .copied()
            .ok_or_else(|| self.unexpected_end(1))
    }

    /// `true` iff the low bit of the next byte is set.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_byte()? & 1 == 1)
    }

    /// The next byte as a flag set; every bit is retained as-is.
    #[inline]
    pub fn read_flags<F: Flags<Bits = u8>>(&mut self) -> Result<F> {
        Ok(F::from_bits_retain(self.read_byte()?))
    }

    /// Four bytes, big-endian. Used for the file magic and absolute offsets.
    pub fn read_fixed_u32(&mut self) -> Result<u32> {
        let bytes = self
            .buf
            .get(self.offset..)
            .and_then(<[u8]>::first_chunk::<4>)
            .ok_or_else(|| self.unexpected_end(4))?;
        self.offset += 4;
        Ok(u32::from_be_bytes(*bytes))
    }

    // === Variable-Width Primitives ===

    /// A prefix-tagged 1/2/4-byte unsigned integer. See [`varint`].
    pub fn read_uint(&mut self) -> Result<u32> {
        let first = self.peek_byte()?;
        let (value, width) = self
            .buf
            .get(self.offset..)
            .and_then(varint::decode_uint)
            .ok_or_else(|| self.unexpected_end(varint::encoded_len(first)))?;
        self.offset += width;
        Ok(value)
    }

    /// Length of a sequence that follows.
    #[inline]
    pub fn read_list_length(&mut self) -> Result<usize> {
        Ok(self.read_uint()? as usize)
    }

    /// A canonical-name table reference; `0` on the wire is [`NameIndex::NONE`].
    #[inline]
    pub fn read_canonical_name_reference(&mut self) -> Result<NameIndex> {
        Ok(NameIndex::from_biased(self.read_uint()?))
    }

    // === Tags ===

    /// The next node kind, advancing one byte. Any inline payload is dropped.
    #[inline]
    pub fn read_tag(&mut self) -> Result<Tag> {
        Ok(self.read_tag_with_payload()?.0)
    }

    /// The next node kind without advancing.
    #[inline]
    pub fn peek_tag(&self) -> Result<Tag> {
        Ok(self.peek_tag_with_payload()?.0)
    }

    /// The next node kind and, for specialized tags, its 3-bit payload.
    pub fn read_tag_with_payload(&mut self) -> Result<(Tag, Option<u8>)> {
        let decoded = self.peek_tag_with_payload()?;
        self.offset += 1;
        Ok(decoded)
    }

    /// Like [`read_tag_with_payload`](Self::read_tag_with_payload), without
    /// advancing.
    pub fn peek_tag_with_payload(&self) -> Result<(Tag, Option<u8>)> {
        let byte = self.peek_byte()?;
        let (coarse, payload) = split_tag_byte(byte);
        let tag = Tag::from_u8(coarse).ok_or(DecodeError::UnknownTag {
            offset: self.offset,
            byte,
        })?;
        Ok((tag, payload))
    }

    // === Positions ===

    /// A biased source position, folded into the running aggregate.
    pub fn read_position(&mut self) -> Result<TokenPosition> {
        let position = TokenPosition::from_biased(self.read_uint()?);
        self.positions.record(position);
        Ok(position)
    }

    /// Largest position read since the last reset.
    #[inline]
    pub fn max_position(&self) -> TokenPosition {
        self.positions.max
    }

    /// Smallest real position read since the last reset, or the sentinel.
    #[inline]
    pub fn min_position(&self) -> TokenPosition {
        self.positions.min
    }

    /// Copy of the current aggregate.
    #[inline]
    pub fn snapshot_positions(&self) -> PositionRange {
        self.positions
    }

    /// Return the aggregate to the unset state.
    #[inline]
    pub fn reset_positions(&mut self) {
        self.positions = PositionRange::UNSET;
    }

    /// Fold a saved aggregate back into the current one.
    #[inline]
    pub fn merge_positions(&mut self, snapshot: PositionRange) {
        self.positions.merge(snapshot);
    }

    /// Enter a position scope; it merges back when dropped.
    pub fn position_scope(&mut self) -> PositionScope<'_, 'a> {
        PositionScope::new(self)
    }

    /// Run `f` inside a position scope.
    ///
    /// Returns `f`'s result together with the range the region covered on
    /// its own, before it was merged into the enclosing aggregate.
    pub fn with_position_scope<R>(
        &mut self,
        f: impl FnOnce(&mut Reader<'a>) -> R,
    ) -> (R, PositionRange) {
        let mut scope = self.position_scope();
        let result = f(&mut scope);
        let region = scope.snapshot_positions();
        (result, region)
    }
}
