//! Driving a complete decode pass.
//!
//! A pass is all-or-nothing: it either decodes the whole buffer or fails with
//! a [`DecodeError`]. [`decode_pass`] surfaces that error to the caller;
//! [`decode_or_abort`] is the top-level entry point that turns it into a hard
//! stop.

use crate::{DecodeError, Reader, Result};

/// Leading magic of a kernel program file, stored big-endian.
pub const MAGIC_PROGRAM_FILE: u32 = 0x90AB_CDEF;

/// Framing checks applied around a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassOptions {
    /// Read and check [`MAGIC_PROGRAM_FILE`] before decoding.
    pub expect_magic: bool,
    /// Require the pass to consume the whole buffer.
    pub require_end: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        PassOptions {
            expect_magic: true,
            require_end: true,
        }
    }
}

impl PassOptions {
    /// No magic and no end check, for sub-buffers and partial reads.
    pub fn raw() -> Self {
        PassOptions {
            expect_magic: false,
            require_end: false,
        }
    }
}

/// Decode `bytes` with `decode`, applying the framing checks in `options`.
pub fn decode_pass<'a, T>(
    bytes: &'a [u8],
    options: PassOptions,
    decode: impl FnOnce(&mut Reader<'a>) -> Result<T>,
) -> Result<T> {
    tracing::debug!(size = bytes.len(), ?options, "kernel decode pass");

    let mut reader = Reader::new(bytes);
    let result = run(&mut reader, options, decode);

    match &result {
        Ok(_) => tracing::debug!(
            offset = reader.offset(),
            min = reader.min_position().value(),
            max = reader.max_position().value(),
            "kernel decode pass complete"
        ),
        Err(error) => tracing::error!(offset = ?error.offset(), %error, "kernel decode pass failed"),
    }
    result
}

fn run<'a, T>(
    reader: &mut Reader<'a>,
    options: PassOptions,
    decode: impl FnOnce(&mut Reader<'a>) -> Result<T>,
) -> Result<T> {
    if options.expect_magic {
        let found = reader.read_fixed_u32()?;
        if found != MAGIC_PROGRAM_FILE {
            return Err(DecodeError::BadMagic { found });
        }
    }

    let value = decode(reader)?;

    if options.require_end {
        reader.ensure_end()?;
    }
    Ok(value)
}

/// Like [`decode_pass`], but a malformed buffer is a hard stop.
///
/// The format has no recovery story, so the top level treats a failed pass as
/// a toolchain defect.
///
/// # Panics
///
/// Panics with the [`DecodeError`] message when the pass fails. Under
/// `panic = "abort"` this terminates the process.
pub fn decode_or_abort<'a, T>(
    bytes: &'a [u8],
    options: PassOptions,
    decode: impl FnOnce(&mut Reader<'a>) -> Result<T>,
) -> T {
    match decode_pass(bytes, options, decode) {
        Ok(value) => value,
        Err(error) => panic!("reading kernel file: {error}"),
    }
}
