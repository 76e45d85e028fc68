//! Primitive reader for the kernel IR binary format.
//!
//! The kernel format is a compact, tagged serialization of the front-end's
//! abstract syntax tree. This crate provides the ordered primitive reads every
//! node decoder builds on:
//!
//! - [`Reader`]: a zero-copy cursor over one borrowed buffer
//! - [`Tag`]: node kinds, including specialized tags with an inline payload
//! - [`TokenPosition`] / [`PositionRange`]: biased source positions and the
//!   running min/max aggregate, scoped with [`PositionScope`]
//! - [`NameIndex`]: biased canonical-name table references
//! - [`ReadFrom`]: the capability used by the optional-value framer
//! - [`decode_pass`] / [`decode_or_abort`]: drive one full pass over a buffer
//!
//! The format is a trust boundary. Producer and consumer agree on version and
//! encoding, so every failure is a [`DecodeError`] that ends the pass. There
//! is no resynchronization.
//!
//! # Example
//!
//! ```
//! use kernel_binary::{decode_pass, PassOptions, Tag};
//!
//! // magic, a VariableGet tag, then a single-byte uint
//! let bytes = [0x90, 0xAB, 0xCD, 0xEF, 20, 5];
//! let slot = decode_pass(&bytes, PassOptions::default(), |reader| {
//!     assert_eq!(reader.read_tag()?, Tag::VariableGet);
//!     reader.read_uint()
//! })
//! .unwrap();
//! assert_eq!(slot, 5);
//! ```

mod error;
mod name_index;
mod optional;
mod pass;
mod position;
mod reader;
mod stack;
pub mod tag;
pub mod varint;

#[cfg(test)]
mod test_support;

pub use error::{DecodeError, Result};
pub use name_index::NameIndex;
pub use optional::ReadFrom;
pub use pass::{decode_or_abort, decode_pass, PassOptions, MAGIC_PROGRAM_FILE};
pub use position::{PositionRange, PositionScope, TokenPosition};
pub use reader::Reader;
pub use tag::Tag;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for decode diagnostics.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=kernel_binary=debug` or `RUST_LOG=kernel_binary=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
