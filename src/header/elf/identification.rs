//! Implementation of the `ident` field of the ELF header. This field is
//! located at the beginning of an ELF object file and specifies how the
//! rest of the file is to be decoded.

use std::io::Write;

use num_derive::{FromPrimitive, ToPrimitive};

use crate::{base::ElfByte, error::Error, HasWrittenSize, ToWriter};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive)]
#[non_exhaustive]
/// The file's class/capacity, i.e. whether it is 32-bit or 64-bit.
///
/// A file's data encoding and class specifies how to interpret the basic
/// objects in a file. Class ELFCLASS32 files use objects that occupy 1, 2,
/// and 4 bytes.
pub enum ElfClass {
    /// Unspecified
    None = 0,
    /// 32-bit
    Elf32 = 1,
    /// 64-bit
    Elf64 = 2,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive)]
#[non_exhaustive]
/// The file's data encoding, i.e. whether it is little-endian or big-endian.
///
/// Encoding ELFDATA2LSB specifies 2's complement values, with the least
/// significant byte occupying the lowest address.
pub enum ElfDataEncoding {
    /// Unspecified or invalid data encoding
    None = 0,
    /// Little-endian
    LittleEndian = 1,
    /// Big-endian
    BigEndian = 2,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive)]
#[non_exhaustive]
/// The version of the ELF header identifier
pub enum ElfIdentifierVersion {
    /// Invalid version
    None = 0,
    /// Current version
    Current = 1,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive)]
#[non_exhaustive]
/// The operating system ABI of the object
pub enum ElfOSABI {
    /// No extensions or unspecified, also the System V ABI
    NoneSystemV = 0,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The identifier field of an ELF header. These 16 bytes mark the file as
/// an object file and provide machine-independent data with which to
/// decode and interpret the file's contents.
pub struct ElfHeaderIdentifier {
    /// The magic number, `\x7fELF`
    pub magic: [ElfByte; 4],
    /// The file's class
    pub class: ElfClass,
    /// The file's data encoding
    pub data_encoding: ElfDataEncoding,
    /// The identifier version
    pub version: ElfIdentifierVersion,
    /// The operating system ABI
    pub os_abi: ElfOSABI,
    /// The ABI version, which this ABI leaves at zero
    pub abi_version: ElfByte,
    /// Marks the beginning of the unused bytes in the identifier, all zero
    pub pad: [ElfByte; 7],
}

impl Default for ElfHeaderIdentifier {
    fn default() -> Self {
        Self {
            magic: [ElfByte(0x7f), ElfByte(b'E'), ElfByte(b'L'), ElfByte(b'F')],
            class: ElfClass::Elf32,
            data_encoding: ElfDataEncoding::LittleEndian,
            version: ElfIdentifierVersion::Current,
            os_abi: ElfOSABI::NoneSystemV,
            abi_version: ElfByte(0),
            pad: [ElfByte(0); 7],
        }
    }
}

impl<W> ToWriter<W> for ElfHeaderIdentifier
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        self.magic.iter().try_for_each(|b| b.to_writer(writer))?;
        ElfByte(self.class as u8).to_writer(writer)?;
        ElfByte(self.data_encoding as u8).to_writer(writer)?;
        ElfByte(self.version as u8).to_writer(writer)?;
        ElfByte(self.os_abi as u8).to_writer(writer)?;
        self.abi_version.to_writer(writer)?;
        self.pad.iter().try_for_each(|b| b.to_writer(writer))?;
        Ok(())
    }
}

impl HasWrittenSize for ElfHeaderIdentifier {
    const SIZE: usize = 16;
}
