//! Base types for ELF32 object file structures
//!
//! Every multi-byte field in the output is little-endian; these newtypes
//! carry that contract so the serialization code never writes a raw
//! integer directly.

use std::{fmt::Display, io::Write, mem::size_of};

use crate::{error::Error, HasWrittenSize, ToWriter};

/// Raw representation of a byte in an ELF file
pub type RawElfByte = u8;
/// Raw representation of a half-word in an ELF class 32 file
pub type RawElfHalfWord = u16;
/// Raw representation of a word in an ELF class 32 file
pub type RawElfWord = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A byte in an ELF file. Always represented as a single byte.
pub struct ElfByte(pub u8);

impl<W> ToWriter<W> for ElfByte
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        writer
            .write_all(&[self.0])
            .map_err(|e| Error::Io { kind: e.kind() })?;
        Ok(())
    }
}

impl HasWrittenSize for ElfByte {
    const SIZE: usize = size_of::<RawElfByte>();
}

impl Display for ElfByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ElfByte> for u8 {
    fn from(val: ElfByte) -> Self {
        val.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A half-word in an ELF class 32 file, written little-endian
pub struct ElfHalfWord(pub u16);

impl<W> ToWriter<W> for ElfHalfWord
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        writer
            .write_all(&self.0.to_le_bytes())
            .map_err(|e| Error::Io { kind: e.kind() })?;
        Ok(())
    }
}

impl HasWrittenSize for ElfHalfWord {
    const SIZE: usize = size_of::<RawElfHalfWord>();
}

impl Display for ElfHalfWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ElfHalfWord> for u16 {
    fn from(val: ElfHalfWord) -> Self {
        val.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A word in an ELF class 32 file, written little-endian
pub struct ElfWord(pub u32);

impl<W> ToWriter<W> for ElfWord
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        writer
            .write_all(&self.0.to_le_bytes())
            .map_err(|e| Error::Io { kind: e.kind() })?;
        Ok(())
    }
}

impl HasWrittenSize for ElfWord {
    const SIZE: usize = size_of::<RawElfWord>();
}

impl Display for ElfWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ElfWord> for u32 {
    fn from(val: ElfWord) -> Self {
        val.0
    }
}
