//! Implementation of the ELF section header

use std::io::Write;

use bitflags::bitflags;
use typed_builder::TypedBuilder;

use crate::{base::ElfWord, error::Error, HasWrittenSize, ToWriter};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// The type of an ELF section
pub enum SectionHeaderType {
    /// Marks the section header as inactive; it does not have an
    /// associated section. Other members of the section header have
    /// undefined values.
    Null = 0,
    /// Holds information defined by the program, whose format and meaning
    /// are determined solely by the program.
    ProgramBits = 1,
    /// Holds a symbol table providing symbols for link editing. As a
    /// complete symbol table, it may contain many symbols unnecessary for
    /// dynamic linking.
    SymbolTable = 2,
    /// The section holds a string table. An object file may have multiple
    /// string table sections.
    StringTable = 3,
    /// A section of this type occupies no space in the file but otherwise
    /// resembles SHT_PROGBITS. Although this section contains no bytes,
    /// the sh_offset member contains the conceptual file offset.
    NoBits = 8,
    /// The section holds relocation entries without explicit addends, such
    /// as type Elf32_Rel for the 32-bit class of object files. An object
    /// file may have multiple relocation sections.
    RelocationImplicit = 9,
}

impl<W> ToWriter<W> for SectionHeaderType
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        ElfWord(*self as u32).to_writer(writer)
    }
}

impl HasWrittenSize for SectionHeaderType {
    const SIZE: usize = ElfWord::SIZE;
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    /// Bit-flags that describe miscellaneous section attributes
    pub struct SectionFlags: u32 {
        /// The section contains data that should be writable during
        /// process execution
        const WRITE = 0x1;
        /// The section occupies memory during process execution. Some
        /// control sections do not reside in the memory image of an object
        /// file; this attribute is off for those sections.
        const ALLOC = 0x2;
        /// The section contains executable machine instructions
        const EXECINSTR = 0x4;
    }
}

impl<W> ToWriter<W> for SectionFlags
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        ElfWord(self.bits()).to_writer(writer)
    }
}

impl HasWrittenSize for SectionFlags {
    const SIZE: usize = ElfWord::SIZE;
}

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
/// An entry in the section header table. Every field of the 40-byte
/// Elf32_Shdr record is a little-endian word.
pub struct SectionHeader {
    #[builder(default = ElfWord(0))]
    /// The name of the section. Its value is an index into the section
    /// header string table section giving the location of a
    /// null-terminated string.
    pub name: ElfWord,
    #[builder(default = SectionHeaderType::Null)]
    /// The section's contents and semantics
    pub r#type: SectionHeaderType,
    #[builder(default = SectionFlags::empty())]
    /// Bit-flags that describe miscellaneous attributes
    pub flags: SectionFlags,
    #[builder(default = ElfWord(0))]
    /// The address at which the section's first byte should reside in the
    /// memory image of a process; always zero in a relocatable object
    pub address: ElfWord,
    #[builder(default = ElfWord(0))]
    /// The byte offset from the beginning of the file to the first byte in
    /// the section. SHT_NOBITS occupies no space in the file, and its
    /// sh_offset member locates the conceptual placement in the file.
    pub offset: ElfWord,
    #[builder(default = ElfWord(0))]
    /// The section's size in bytes. A section of type SHT_NOBITS may have
    /// a non-zero size, but it occupies no space in the file.
    pub size: ElfWord,
    #[builder(default = ElfWord(0))]
    /// A section header table index link, whose interpretation depends on
    /// the section type: the associated string table for SHT_SYMTAB and
    /// the associated symbol table for SHT_REL
    pub link: ElfWord,
    #[builder(default = ElfWord(0))]
    /// Extra information, whose interpretation depends on the section
    /// type: one greater than the last local symbol index for SHT_SYMTAB,
    /// and the index of the section to which the relocations apply for
    /// SHT_REL
    pub info: ElfWord,
    #[builder(default = ElfWord(1))]
    /// The section's address alignment constraint. Only 0 and positive
    /// integral powers of two are allowed; 0 and 1 mean the section has no
    /// alignment constraints.
    pub address_align: ElfWord,
    #[builder(default = ElfWord(0))]
    /// The size in bytes of each entry, for sections holding a table of
    /// fixed-size entries; zero otherwise
    pub entry_size: ElfWord,
}

impl<W> ToWriter<W> for SectionHeader
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        self.name.to_writer(writer)?;
        self.r#type.to_writer(writer)?;
        self.flags.to_writer(writer)?;
        self.address.to_writer(writer)?;
        self.offset.to_writer(writer)?;
        self.size.to_writer(writer)?;
        self.link.to_writer(writer)?;
        self.info.to_writer(writer)?;
        self.address_align.to_writer(writer)?;
        self.entry_size.to_writer(writer)?;
        Ok(())
    }
}

impl HasWrittenSize for SectionHeader {
    const SIZE: usize = ElfWord::SIZE * 10;
}
