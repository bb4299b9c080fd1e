//! Symbols and the serialized symbol table entry

use std::io::Write;

use num_derive::FromPrimitive;

use crate::{
    base::{ElfByte, ElfHalfWord, ElfWord},
    error::Error,
    HasWrittenSize, ToWriter,
};

/// Special section index marking an undefined symbol
pub const SHN_UNDEF: u16 = 0;
/// Special section index marking an absolute (non-relocatable) symbol
pub const SHN_ABS: u16 = 0xfff1;
/// Special section index marking a common symbol, whose storage the
/// linker allocates and whose value is its required size
pub const SHN_COMMON: u16 = 0xfff2;

/// Symbol type STT_SECTION, used by the synthetic per-section symbols
pub const STT_SECTION: u8 = 3;
/// Symbol type STT_FILE, used by the source-file symbol at index 1
pub const STT_FILE: u8 = 4;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A symbol's binding, stored as the value of the `st_info` byte the
/// symbol table entry carries for an untyped symbol
pub enum SymbolBinding {
    /// STB_LOCAL, not visible outside the object
    Local = 0x00,
    /// STB_GLOBAL, visible to all objects being combined
    Global = 0x10,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
/// The kind of label definition the front end is making
pub enum LabelKind {
    /// An ordinary label, local to the object
    Local = 0,
    /// A label exported (or imported, when undefined) as a global symbol
    Global = 1,
    /// A common variable; the offset argument carries its size
    Common = 2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A user symbol recorded by a label definition
pub struct Symbol {
    /// Byte offset of the symbol's name in `.strtab`
    pub strpos: u32,
    /// 1-based section registry index, or one of the SHN_* sentinels
    pub section: u16,
    /// Local or global binding
    pub binding: SymbolBinding,
    /// The symbol's address, or its size for a common symbol
    pub value: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A 16-byte Elf32_Sym record as serialized into `.symtab`
pub struct SymbolEntry {
    /// `st_name`, the `.strtab` offset of the symbol's name
    pub name: ElfWord,
    /// `st_value`
    pub value: ElfWord,
    /// `st_size`; zero except for common symbols, where it mirrors the
    /// value
    pub size: ElfWord,
    /// `st_info`, binding and type packed into one byte
    pub info: ElfByte,
    /// `st_other`, always zero
    pub other: ElfByte,
    /// `st_shndx`, the defining section index or an SHN_* sentinel
    pub shndx: ElfHalfWord,
}

impl<W> ToWriter<W> for SymbolEntry
where
    W: Write,
{
    type Error = Error;

    fn to_writer(&self, writer: &mut W) -> Result<(), Self::Error> {
        self.name.to_writer(writer)?;
        self.value.to_writer(writer)?;
        self.size.to_writer(writer)?;
        self.info.to_writer(writer)?;
        self.other.to_writer(writer)?;
        self.shndx.to_writer(writer)?;
        Ok(())
    }
}

impl HasWrittenSize for SymbolEntry {
    const SIZE: usize = 16;
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod test {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_entry_is_16_bytes() {
        let mut out = Vec::new();
        SymbolEntry::default().to_writer(&mut out).unwrap();
        assert_eq!(out.len(), SymbolEntry::SIZE);
        assert_eq!(out, [0; 16]);
    }

    #[test]
    fn test_file_entry_bytes() {
        let mut out = Vec::new();
        SymbolEntry {
            name: ElfWord(1),
            info: ElfByte(STT_FILE),
            shndx: ElfHalfWord(SHN_ABS),
            ..Default::default()
        }
        .to_writer(&mut out)
        .unwrap();
        assert_eq!(
            out,
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0xf1, 0xff]
        );
    }

    #[test]
    fn test_label_kind_from_primitive() {
        assert_eq!(LabelKind::from_i32(0), Some(LabelKind::Local));
        assert_eq!(LabelKind::from_i32(2), Some(LabelKind::Common));
        assert_eq!(LabelKind::from_i32(3), None);
    }
}
