//! Canonical-name table references.

use std::fmt;

use crate::varint::MAX_FOUR_BYTE;

/// Index into the externally owned canonical-name table.
///
/// Stored with a +1 bias: table index 0 is a real, frequently used entry, so
/// an encoded `0` is reserved for "no reference" and decodes to
/// [`NameIndex::NONE`] (`-1`).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct NameIndex(i32);

impl NameIndex {
    /// No reference (an absent optional name, not the table root).
    pub const NONE: NameIndex = NameIndex(-1);

    /// Decode a stored (biased) reference.
    #[inline]
    pub const fn from_biased(raw: u32) -> Self {
        #[expect(
            clippy::cast_possible_wrap,
            reason = "masked to 30 bits, always fits in i32"
        )]
        let raw = (raw & MAX_FOUR_BYTE) as i32;
        NameIndex(raw - 1)
    }

    /// Raw index; `-1` for [`NONE`](Self::NONE).
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 < 0
    }

    /// Table index, or `None` for "no reference".
    #[inline]
    pub fn index(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }
}

impl fmt::Debug for NameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(index) => write!(f, "NameIndex({index})"),
            None => write!(f, "NameIndex(None)"),
        }
    }
}
