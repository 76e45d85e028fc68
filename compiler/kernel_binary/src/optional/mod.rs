//! Optional-value framing.
//!
//! An optional child is one framing tag: [`Tag::Nothing`] for absent, or
//! [`Tag::Something`] followed directly by the child's own encoding. Any other
//! tag in that position is a format error.

use crate::stack::ensure_sufficient_stack;
use crate::{DecodeError, NameIndex, Reader, Result, Tag, TokenPosition};

/// A value that knows how to decode itself from a [`Reader`].
///
/// Node decoders implement this so they can appear as optional children:
///
/// ```
/// use kernel_binary::{ReadFrom, Reader, Result, TokenPosition};
///
/// struct Label {
///     position: TokenPosition,
///     target: u32,
/// }
///
/// impl<'a> ReadFrom<'a> for Label {
///     fn read_from(reader: &mut Reader<'a>) -> Result<Self> {
///         Ok(Label {
///             position: reader.read_position()?,
///             target: reader.read_uint()?,
///         })
///     }
/// }
///
/// let bytes = [1, 6, 4]; // Something, position 5, target 4
/// let label = Reader::new(&bytes).read_optional::<Label>().unwrap().unwrap();
/// assert_eq!(label.position, TokenPosition::new(5));
/// assert_eq!(label.target, 4);
/// ```
pub trait ReadFrom<'a>: Sized {
    fn read_from(reader: &mut Reader<'a>) -> Result<Self>;
}

impl<'a> Reader<'a> {
    /// An optional `T`, decoded with `T`'s own [`ReadFrom`] routine.
    pub fn read_optional<T: ReadFrom<'a>>(&mut self) -> Result<Option<T>> {
        self.read_optional_with(T::read_from)
    }

    /// An optional value decoded by `read`.
    ///
    /// For children whose decode routine is not the element type's own.
    pub fn read_optional_with<T>(
        &mut self,
        read: impl FnOnce(&mut Reader<'a>) -> Result<T>,
    ) -> Result<Option<T>> {
        let offset = self.offset();
        match self.read_tag()? {
            Tag::Nothing => Ok(None),
            Tag::Something => ensure_sufficient_stack(|| read(self)).map(Some),
            found => Err(DecodeError::UnexpectedTag {
                offset,
                expected: "Nothing or Something",
                found,
            }),
        }
    }
}

impl<'a> ReadFrom<'a> for TokenPosition {
    fn read_from(reader: &mut Reader<'a>) -> Result<Self> {
        reader.read_position()
    }
}

impl<'a> ReadFrom<'a> for NameIndex {
    fn read_from(reader: &mut Reader<'a>) -> Result<Self> {
        reader.read_canonical_name_reference()
    }
}

impl<'a> ReadFrom<'a> for u32 {
    fn read_from(reader: &mut Reader<'a>) -> Result<Self> {
        reader.read_uint()
    }
}

impl<'a> ReadFrom<'a> for bool {
    fn read_from(reader: &mut Reader<'a>) -> Result<Self> {
        reader.read_bool()
    }
}
