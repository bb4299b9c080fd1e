//! Writer for ELF32 (i386) relocatable object files
//!
//! This crate is the object-file back end of an x86 assembler: the front end
//! drives an [`writer::ElfWriter`] through the [`writer::OutputFormat`]
//! protocol (section selection, label definition, byte and address
//! emission), and the writer serializes a little-endian `ET_REL` object for
//! the i386 System V ABI when it is finished.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

use std::io::Write;

pub mod base;
pub mod container;
pub mod error;
pub mod header;
pub mod reloc;
pub mod section;
pub mod strtab;
pub mod symbol;
pub mod writer;

/// Encode an instance of a type to a writer
pub trait ToWriter<W>
where
    W: Write,
    Self: Sized,
{
    /// The error type for this operation
    type Error;

    /// Encode an instance of this type to a writer
    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error>;
}

/// A type which always has a known size when written to a writer
pub trait HasWrittenSize {
    /// The size when written
    const SIZE: usize;
}
