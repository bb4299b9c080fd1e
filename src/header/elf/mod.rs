//! Implementation of the ELF header. This header is located at the
//! beginning of the ELF object file and is the only header type in the ELF
//! specification which must be located at a specific offset (0) in the
//! file.

use std::io::Write;

use typed_builder::TypedBuilder;

use crate::{
    base::{ElfHalfWord, ElfWord},
    error::Error,
    HasWrittenSize, ToWriter,
};

use self::identification::ElfHeaderIdentifier;

pub mod identification;

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// The ELF object type
pub enum ElfType {
    /// No file type
    None = 0,
    /// Relocatable file type, the only type this writer produces
    Relocatable = 1,
    /// Executable file type
    Executable = 2,
    /// Shared object file type
    Dynamic = 3,
    /// Core file
    Core = 4,
}

impl<W> ToWriter<W> for ElfType
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        ElfHalfWord(*self as u16).to_writer(writer)
    }
}

impl HasWrittenSize for ElfType {
    const SIZE: usize = ElfHalfWord::SIZE;
}

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// The ELF object's machine
pub enum ElfMachine {
    /// No machine
    None = 0,
    /// Intel 80386, the only machine this writer targets
    I386 = 3,
}

impl<W> ToWriter<W> for ElfMachine
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        ElfHalfWord(*self as u16).to_writer(writer)
    }
}

impl HasWrittenSize for ElfMachine {
    const SIZE: usize = ElfHalfWord::SIZE;
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// The ELF object's version
pub enum ElfVersion {
    /// Invalid version
    None = 0,
    /// Current version
    Current = 1,
}

impl<W> ToWriter<W> for ElfVersion
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        ElfWord(*self as u32).to_writer(writer)
    }
}

impl HasWrittenSize for ElfVersion {
    const SIZE: usize = ElfWord::SIZE;
}

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
/// The header for an ELF object. Resides at the beginning and holds a
/// ``road map'' describing the file's organization.
///
/// The builder defaults describe a relocatable i386 object whose section
/// header table immediately follows the header and its alignment padding:
/// no entrypoint, no program header table, and fixed entry sizes for the
/// header itself and the section header entries.
pub struct ElfHeader {
    #[builder(default)]
    /// The file's identifier information
    pub identifier: ElfHeaderIdentifier,
    #[builder(default = ElfType::Relocatable)]
    /// The object file type
    pub r#type: ElfType,
    #[builder(default = ElfMachine::I386)]
    /// The file's machine, which specifies the required architecture for
    /// this object file
    pub machine: ElfMachine,
    #[builder(default = ElfVersion::Current)]
    /// The object file version
    pub version: ElfVersion,
    #[builder(default = ElfWord(0))]
    /// The file's entrypoint; zero (absent) for relocatable objects
    pub entrypoint: ElfWord,
    #[builder(default = ElfWord(0))]
    /// The program header table's file offset in bytes; zero (absent) for
    /// relocatable objects
    pub program_header_offset: ElfWord,
    #[builder(default = ElfWord(0x40))]
    /// The section header table's file offset in bytes
    pub section_header_offset: ElfWord,
    #[builder(default = ElfWord(0))]
    /// The processor-specific flags associated with the file; i386 defines
    /// none
    pub flags: ElfWord,
    #[builder(default = ElfHalfWord(0x34))]
    /// The ELF header's size in bytes
    pub header_size: ElfHalfWord,
    #[builder(default = ElfHalfWord(0))]
    /// The size in bytes of a program header table entry
    pub program_header_entry_size: ElfHalfWord,
    #[builder(default = ElfHalfWord(0))]
    /// The number of entries in the program header table
    pub program_header_entry_count: ElfHalfWord,
    #[builder(default = ElfHalfWord(0x28))]
    /// The size in bytes of a section header table entry; all entries are
    /// the same size
    pub section_header_entry_size: ElfHalfWord,
    /// The number of entries in the section header table
    pub section_header_entry_count: ElfHalfWord,
    /// The section header table index of the entry associated with the
    /// section name string table
    pub section_name_string_table_index: ElfHalfWord,
}

impl<W> ToWriter<W> for ElfHeader
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        self.identifier.to_writer(writer)?;
        self.r#type.to_writer(writer)?;
        self.machine.to_writer(writer)?;
        self.version.to_writer(writer)?;
        self.entrypoint.to_writer(writer)?;
        self.program_header_offset.to_writer(writer)?;
        self.section_header_offset.to_writer(writer)?;
        self.flags.to_writer(writer)?;
        self.header_size.to_writer(writer)?;
        self.program_header_entry_size.to_writer(writer)?;
        self.program_header_entry_count.to_writer(writer)?;
        self.section_header_entry_size.to_writer(writer)?;
        self.section_header_entry_count.to_writer(writer)?;
        self.section_name_string_table_index.to_writer(writer)?;
        Ok(())
    }
}

impl HasWrittenSize for ElfHeader {
    const SIZE: usize = ElfHeaderIdentifier::SIZE
        + ElfType::SIZE
        + ElfMachine::SIZE
        + ElfVersion::SIZE
        + (ElfWord::SIZE * 5)
        + (ElfHalfWord::SIZE * 6);
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_header_is_52_bytes() {
        assert_eq!(ElfHeader::SIZE, 0x34);
    }

    #[test]
    fn test_relocatable_header_bytes() {
        let header = ElfHeader::builder()
            .section_header_entry_count(ElfHalfWord(6))
            .section_name_string_table_index(ElfHalfWord(3))
            .build();

        let mut out = Vec::new();
        header.to_writer(&mut out).unwrap();
        assert_eq!(out.len(), ElfHeader::SIZE);
        // e_ident
        assert_eq!(
            &out[..16],
            &[0x7f, 0x45, 0x4c, 0x46, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        // e_type ET_REL, e_machine EM_386
        assert_eq!(&out[16..20], &[1, 0, 3, 0]);
        // e_version EV_CURRENT
        assert_eq!(&out[20..24], &[1, 0, 0, 0]);
        // e_entry, e_phoff zero; e_shoff 0x40
        assert_eq!(&out[24..36], &[0, 0, 0, 0, 0, 0, 0, 0, 0x40, 0, 0, 0]);
        // e_flags zero, e_ehsize 0x34, e_phentsize/e_phnum zero
        assert_eq!(&out[36..46], &[0, 0, 0, 0, 0x34, 0, 0, 0, 0, 0]);
        // e_shentsize 0x28, e_shnum 6, e_shstrndx 3
        assert_eq!(&out[46..52], &[0x28, 0, 6, 0, 3, 0]);
    }
}
