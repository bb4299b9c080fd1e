//! Registry of user sections and the section directive attribute parser

use crate::{
    container::ByteStream,
    error::Severity,
    header::section::{SectionFlags, SectionHeaderType},
    reloc::Reloc,
};

/// An opaque integer allocated by the assembler front end to name a
/// section. Section IDs are always even; an odd ID denotes a segment-base
/// reference to the section below it, which this format rejects.
pub type SegmentId = i32;

/// Section names reserved for the writer's own tables; the section
/// directive must not redefine them
pub const RESERVED_NAMES: [&str; 4] = [".comment", ".shstrtab", ".symtab", ".strtab"];

#[derive(Debug)]
/// A user section under construction
pub struct Section {
    /// The section name as given in the section directive
    pub name: String,
    /// The external segment ID naming this section from the front end's
    /// point of view; fixed at creation
    pub index: SegmentId,
    /// SHT_PROGBITS or SHT_NOBITS
    pub kind: SectionHeaderType,
    /// The section's attribute flags
    pub flags: SectionFlags,
    /// Power-of-two alignment
    pub align: u32,
    /// The payload stream; absent for SHT_NOBITS
    pub data: Option<ByteStream>,
    /// Logical length in bytes. Equals the payload length for
    /// SHT_PROGBITS; grows without a payload for SHT_NOBITS.
    pub len: u32,
    /// Pending relocations against this section, in append order
    pub relocs: Vec<Reloc>,
    /// Offset of this section's name in `.shstrtab`
    pub name_offset: u32,
}

impl Section {
    /// Create an empty section. A payload stream is attached unless the
    /// section is SHT_NOBITS.
    pub fn new(
        name: &str,
        index: SegmentId,
        kind: SectionHeaderType,
        flags: SectionFlags,
        align: u32,
        name_offset: u32,
    ) -> Self {
        Self {
            name: name.to_owned(),
            index,
            kind,
            flags,
            align,
            data: (kind != SectionHeaderType::NoBits).then(ByteStream::new),
            len: 0,
            relocs: Vec::new(),
            name_offset,
        }
    }

    /// Append payload bytes and advance the logical length
    pub fn write(&mut self, bytes: &[u8]) {
        if let Some(data) = self.data.as_mut() {
            data.append(bytes);
        }
        self.len += bytes.len() as u32;
    }

    /// Append zero payload bytes and advance the logical length
    pub fn write_zeroes(&mut self, count: u32) {
        if let Some(data) = self.data.as_mut() {
            data.append_zeroes(count as usize);
        }
        self.len += count;
    }

    /// Advance the logical length without emitting payload bytes
    pub fn advance(&mut self, count: u32) {
        self.len += count;
    }
}

/// The default type, flags, and alignment a section receives when it is
/// first referenced, before any directive attributes are applied
pub fn defaults_for(name: &str) -> (SectionHeaderType, SectionFlags, u32) {
    match name {
        ".text" => (
            SectionHeaderType::ProgramBits,
            SectionFlags::ALLOC | SectionFlags::EXECINSTR,
            16,
        ),
        ".data" => (
            SectionHeaderType::ProgramBits,
            SectionFlags::ALLOC | SectionFlags::WRITE,
            4,
        ),
        ".bss" => (
            SectionHeaderType::NoBits,
            SectionFlags::ALLOC | SectionFlags::WRITE,
            4,
        ),
        _ => (SectionHeaderType::ProgramBits, SectionFlags::ALLOC, 1),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Attribute overrides parsed from the tail of a section directive
pub struct SectionAttributes {
    /// Explicit section type, from a `progbits` or `nobits` token
    pub kind: Option<SectionHeaderType>,
    /// Explicit alignment, already coerced to a power of two
    pub align: Option<u32>,
    /// Flags any token took a position on; cleared from the defaults
    pub flags_and: SectionFlags,
    /// Flags set by a positive token; applied after the clear
    pub flags_or: SectionFlags,
}

impl SectionAttributes {
    /// Parse the space-separated attribute tokens following the section
    /// name. Token matching is case-insensitive and unrecognized tokens
    /// are ignored. A zero alignment becomes 1; a non-power-of-two
    /// alignment is reported as non-fatal and becomes 1.
    pub fn parse<'a>(
        tokens: impl Iterator<Item = &'a str>,
        mut report: impl FnMut(Severity, &str),
    ) -> Self {
        let mut attrs = Self::default();

        for token in tokens {
            if let Some(rest) = strip_prefix_ignore_case(token, "align=") {
                let mut align = parse_leading_int(rest);
                if align == 0 {
                    align = 1;
                }
                if (align - 1) & align != 0 {
                    report(
                        Severity::NonFatal,
                        &format!("section alignment {align} is not a power of two"),
                    );
                    align = 1;
                }
                attrs.align = Some(align as u32);
            } else if token.eq_ignore_ascii_case("alloc") {
                attrs.flags_and |= SectionFlags::ALLOC;
                attrs.flags_or |= SectionFlags::ALLOC;
            } else if token.eq_ignore_ascii_case("noalloc") {
                attrs.flags_and |= SectionFlags::ALLOC;
                attrs.flags_or &= !SectionFlags::ALLOC;
            } else if token.eq_ignore_ascii_case("exec") {
                attrs.flags_and |= SectionFlags::EXECINSTR;
                attrs.flags_or |= SectionFlags::EXECINSTR;
            } else if token.eq_ignore_ascii_case("noexec") {
                attrs.flags_and |= SectionFlags::EXECINSTR;
                attrs.flags_or &= !SectionFlags::EXECINSTR;
            } else if token.eq_ignore_ascii_case("write") {
                attrs.flags_and |= SectionFlags::WRITE;
                attrs.flags_or |= SectionFlags::WRITE;
            } else if token.eq_ignore_ascii_case("nowrite") {
                attrs.flags_and |= SectionFlags::WRITE;
                attrs.flags_or &= !SectionFlags::WRITE;
            } else if token.eq_ignore_ascii_case("progbits") {
                attrs.kind = Some(SectionHeaderType::ProgramBits);
            } else if token.eq_ignore_ascii_case("nobits") {
                attrs.kind = Some(SectionHeaderType::NoBits);
            }
        }

        attrs
    }

    /// Whether the directive carried no recognized attribute tokens
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.align.is_none() && self.flags_and.is_empty()
    }

    /// The flags a section receives from `defaults` under these overrides
    pub fn apply_flags(&self, defaults: SectionFlags) -> SectionFlags {
        (defaults & !self.flags_and) | self.flags_or
    }
}

fn strip_prefix_ignore_case<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    token
        .get(..prefix.len())
        .filter(|p| p.eq_ignore_ascii_case(prefix))
        .map(|_| &token[prefix.len()..])
}

// atoi semantics: an optional sign and leading digits, anything else is 0.
fn parse_leading_int(s: &str) -> i64 {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: &str = &rest[..rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len())];
    sign * digits.parse::<i64>().unwrap_or(0)
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod test {
    use super::*;
    use paste::paste;

    fn parse_quiet(spec: &str) -> SectionAttributes {
        SectionAttributes::parse(spec.split_whitespace(), |_, _| {})
    }

    macro_rules! align_test {
        ($name:ident, $spec:expr, $align:expr, $warnings:expr) => {
            paste! {
                #[test]
                fn [<test_align_ $name>]() {
                    let mut warnings = 0;
                    let attrs = SectionAttributes::parse(
                        $spec.split_whitespace(),
                        |severity, _| {
                            assert_eq!(severity, Severity::NonFatal);
                            warnings += 1;
                        },
                    );
                    assert_eq!(attrs.align, Some($align));
                    assert_eq!(warnings, $warnings);
                }
            }
        };
    }

    align_test!(power_of_two, "align=8", 8, 0);
    align_test!(zero_coerces_to_one, "align=0", 1, 0);
    align_test!(non_power_warns, "align=3", 1, 1);
    align_test!(garbage_coerces_to_one, "align=xyz", 1, 0);
    align_test!(case_insensitive, "ALIGN=16", 16, 0);

    #[test]
    fn test_flag_tokens() {
        let attrs = parse_quiet("alloc noexec write");
        assert_eq!(
            attrs.flags_and,
            SectionFlags::ALLOC | SectionFlags::EXECINSTR | SectionFlags::WRITE
        );
        assert_eq!(attrs.flags_or, SectionFlags::ALLOC | SectionFlags::WRITE);
        assert_eq!(
            attrs.apply_flags(SectionFlags::ALLOC | SectionFlags::EXECINSTR),
            SectionFlags::ALLOC | SectionFlags::WRITE
        );
    }

    #[test]
    fn test_type_tokens() {
        assert_eq!(
            parse_quiet("nobits").kind,
            Some(SectionHeaderType::NoBits)
        );
        assert_eq!(
            parse_quiet("PROGBITS").kind,
            Some(SectionHeaderType::ProgramBits)
        );
    }

    #[test]
    fn test_unknown_tokens_are_ignored() {
        assert!(parse_quiet("sparkly tls").is_empty());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            defaults_for(".text"),
            (
                SectionHeaderType::ProgramBits,
                SectionFlags::ALLOC | SectionFlags::EXECINSTR,
                16
            )
        );
        assert_eq!(
            defaults_for(".bss"),
            (
                SectionHeaderType::NoBits,
                SectionFlags::ALLOC | SectionFlags::WRITE,
                4
            )
        );
        assert_eq!(
            defaults_for(".rodata"),
            (SectionHeaderType::ProgramBits, SectionFlags::ALLOC, 1)
        );
    }

    #[test]
    fn test_nobits_section_has_no_stream() {
        let mut section = Section::new(
            ".bss",
            2,
            SectionHeaderType::NoBits,
            SectionFlags::ALLOC | SectionFlags::WRITE,
            4,
            1,
        );
        section.advance(16);
        assert!(section.data.is_none());
        assert_eq!(section.len, 16);
    }

    #[test]
    fn test_progbits_write_tracks_len() {
        let mut section = Section::new(
            ".text",
            0,
            SectionHeaderType::ProgramBits,
            SectionFlags::ALLOC | SectionFlags::EXECINSTR,
            16,
            1,
        );
        section.write(b"\xc3");
        section.write_zeroes(3);
        assert_eq!(section.len, 4);
        assert_eq!(section.data.as_ref().unwrap().len(), 4);
    }
}
