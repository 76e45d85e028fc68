//! Source positions and the running min/max aggregate.
//!
//! Positions are stored as "real position + 1" so that an encoded `0` is the
//! "no source" sentinel without colliding with position 0.
//!
//! # Aggregate Rule
//!
//! Both [`PositionRange::record`] (one decoded position) and
//! [`PositionRange::merge`] (a whole region at scope exit) use the same rule:
//!
//! - `max := max(max, new)`, always
//! - `min := new` if `min` is unset, else `min(min, new)` only if `new` is real
//!
//! The sentinel orders below every real position, so it never raises `max`
//! and is kept out of an established `min` explicitly.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::varint::MAX_FOUR_BYTE;
use crate::Reader;

/// Source location of a node, or the "no source" sentinel.
///
/// Ordered by raw value, so [`TokenPosition::NO_SOURCE`] compares below
/// every real position.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TokenPosition(i32);

impl TokenPosition {
    /// The node has no source location.
    pub const NO_SOURCE: TokenPosition = TokenPosition(-1);

    /// Create a real position.
    ///
    /// `value` must fit the wire width ([`MAX_FOUR_BYTE`]). Debug builds
    /// assert this; release builds keep only the low 30 bits.
    #[inline]
    pub const fn new(value: u32) -> Self {
        debug_assert!(value <= MAX_FOUR_BYTE, "token position exceeds 30 bits");
        #[expect(
            clippy::cast_possible_wrap,
            reason = "masked to 30 bits, always fits in i32"
        )]
        let value = (value & MAX_FOUR_BYTE) as i32;
        TokenPosition(value)
    }

    /// Decode a stored (biased) position.
    ///
    /// `0` is [`NO_SOURCE`](Self::NO_SOURCE); `n` is position `n - 1`.
    #[inline]
    pub const fn from_biased(raw: u32) -> Self {
        #[expect(
            clippy::cast_possible_wrap,
            reason = "masked to 30 bits, always fits in i32"
        )]
        let raw = (raw & MAX_FOUR_BYTE) as i32;
        TokenPosition(raw - 1)
    }

    /// Raw value; `-1` for the sentinel.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns `true` for an actual source location.
    #[inline]
    pub const fn is_real(self) -> bool {
        self.0 >= 0
    }

    /// Returns `true` for the sentinel.
    #[inline]
    pub const fn is_no_source(self) -> bool {
        self.0 == Self::NO_SOURCE.0
    }
}

impl Default for TokenPosition {
    fn default() -> Self {
        Self::NO_SOURCE
    }
}

impl fmt::Debug for TokenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_no_source() {
            write!(f, "TokenPosition(NoSource)")
        } else {
            write!(f, "TokenPosition({})", self.0)
        }
    }
}

const _: () = assert!(size_of::<TokenPosition>() == 4);

/// Smallest and largest positions seen, or a saved copy of them.
///
/// Both ends start as [`TokenPosition::NO_SOURCE`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct PositionRange {
    pub min: TokenPosition,
    pub max: TokenPosition,
}

impl PositionRange {
    /// Nothing recorded yet.
    pub const UNSET: PositionRange = PositionRange {
        min: TokenPosition::NO_SOURCE,
        max: TokenPosition::NO_SOURCE,
    };

    /// Returns `true` if no real position has reached the minimum.
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.min.is_no_source()
    }

    /// Account for one decoded position.
    #[inline]
    pub fn record(&mut self, position: TokenPosition) {
        self.max = self.max.max(position);
        self.absorb_min(position);
    }

    /// Fold another range into this one.
    ///
    /// Used at scope exit with the outer range saved on entry; nesting is
    /// transparent to the outer aggregate.
    #[inline]
    pub fn merge(&mut self, other: PositionRange) {
        self.max = self.max.max(other.max);
        self.absorb_min(other.min);
    }

    #[inline]
    fn absorb_min(&mut self, candidate: TokenPosition) {
        if self.min.is_no_source() {
            self.min = candidate;
        } else if candidate.is_real() {
            self.min = self.min.min(candidate);
        }
    }
}

/// Scoped position measurement over one region of decoding.
///
/// On creation the reader's aggregate is saved and reset, so reads through the
/// scope measure only the region. On drop (every exit path, including `?`
/// and unwinding) the saved aggregate is merged back in.
///
/// The scope dereferences to the [`Reader`], so the region is decoded through
/// it:
///
/// ```
/// use kernel_binary::{Reader, TokenPosition};
///
/// let bytes = [11, 4]; // positions 10 and 3
/// let mut reader = Reader::new(&bytes);
/// reader.read_position().unwrap();
/// {
///     let mut scope = reader.position_scope();
///     scope.read_position().unwrap();
///     assert_eq!(scope.max_position(), TokenPosition::new(3));
/// }
/// assert_eq!(reader.max_position(), TokenPosition::new(10));
/// assert_eq!(reader.min_position(), TokenPosition::new(3));
/// ```
pub struct PositionScope<'r, 'a> {
    reader: &'r mut Reader<'a>,
    saved: PositionRange,
}

impl<'r, 'a> PositionScope<'r, 'a> {
    pub(crate) fn new(reader: &'r mut Reader<'a>) -> Self {
        let saved = reader.snapshot_positions();
        reader.reset_positions();
        PositionScope { reader, saved }
    }

    /// The enclosing aggregate as it was on entry.
    pub fn outer(&self) -> PositionRange {
        self.saved
    }
}

impl<'a> Deref for PositionScope<'_, 'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Reader<'a> {
        &*self.reader
    }
}

impl<'a> DerefMut for PositionScope<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Reader<'a> {
        &mut *self.reader
    }
}

impl Drop for PositionScope<'_, '_> {
    fn drop(&mut self) {
        self.reader.merge_positions(self.saved);
    }
}

#[cfg(test)]
mod tests;
