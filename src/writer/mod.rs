//! The object writer and the assembler-facing output protocol
//!
//! [`ElfWriter`] owns every table the object file is assembled from. The
//! front end drives it through the [`OutputFormat`] protocol: pick
//! sections, define labels, and emit bytes, reserved space, and addresses
//! in any order, then call [`ElfWriter::finish`] exactly once to lay out
//! and write the container.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, trace};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::{
    base::{ElfByte, ElfHalfWord, ElfWord},
    container::{ByteStream, SparseMap},
    error::{Reporter, Result, Severity},
    header::{
        elf::ElfHeader,
        section::{SectionFlags, SectionHeader, SectionHeaderType},
    },
    reloc::{Reloc, RelocTarget, RelocationEntry},
    section::{defaults_for, Section, SectionAttributes, SegmentId, RESERVED_NAMES},
    strtab::StringTable,
    symbol::{
        LabelKind, Symbol, SymbolBinding, SymbolEntry, SHN_ABS, SHN_COMMON, SHN_UNDEF, STT_FILE,
        STT_SECTION,
    },
    HasWrittenSize, ToWriter,
};

/// Version advertised in the `.comment` section of every emitted object
const ASSEMBLER_VERSION: &str = "0.98";

/// Sections in the file are padded out to this boundary, zero-filled
const SEGMENT_ALIGN: u32 = 16;

const ZERO_PAD: [u8; SEGMENT_ALIGN as usize] = [0; SEGMENT_ALIGN as usize];

/// Segment ID source shared with the front end. The writer draws the
/// pre-allocated `.text` ID at construction and one ID per section it
/// creates afterwards.
pub type SegmentAllocator = Box<dyn FnMut() -> SegmentId>;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
/// The operation requested by an output event, stored in the high nibble
/// of the packed type word
pub enum OutputKind {
    /// Emit bytes verbatim
    RawData = 0x0000_0000,
    /// Emit an absolute address of the packed size
    Address = 0x1000_0000,
    /// Emit a 16-bit PC-relative address; unsupported by this format
    Rel2Adr = 0x2000_0000,
    /// Emit a 32-bit PC-relative address
    Rel4Adr = 0x3000_0000,
    /// Reserve uninitialized space
    Reserve = 0x4000_0000,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The packed op-plus-size word of an output event: the operation lives in
/// the high nibble, the size in bytes in the low bits. Words whose high
/// nibble names no known operation emit nothing.
pub struct OutputType(pub u32);

impl OutputType {
    const KIND_MASK: u32 = 0xf000_0000;
    const SIZE_MASK: u32 = 0x0fff_ffff;

    /// Pack an operation and a size in bytes
    pub fn new(kind: OutputKind, size: u32) -> Self {
        Self(kind as u32 | (size & Self::SIZE_MASK))
    }

    /// The requested operation, if the high nibble names one
    pub fn kind(&self) -> Option<OutputKind> {
        OutputKind::from_u32(self.0 & Self::KIND_MASK)
    }

    /// The size in bytes carried in the low bits
    pub fn size(&self) -> u32 {
        self.0 & Self::SIZE_MASK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The payload of an output event
pub enum OutputData<'a> {
    /// No payload; reserved space carries only a size
    None,
    /// Bytes to emit verbatim
    Bytes(&'a [u8]),
    /// An address value for absolute and PC-relative emissions
    Value(i64),
}

impl OutputData<'_> {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Bytes(bytes) => bytes,
            _ => &[],
        }
    }

    // Address emissions go through a 32-bit little-endian store no matter
    // the requested size, so a byte payload is read back the same way.
    fn value(&self) -> i64 {
        match self {
            Self::Value(value) => *value,
            Self::Bytes(bytes) => {
                let mut word = [0u8; 4];
                let n = bytes.len().min(4);
                word[..n].copy_from_slice(&bytes[..n]);
                i64::from(u32::from_le_bytes(word))
            }
            Self::None => 0,
        }
    }
}

/// The back-end protocol an assembler driver programs against. The writer
/// publishes its format names and accepts the driver's section, label, and
/// output events; everything else about the object file is the writer's
/// business.
pub trait OutputFormat {
    /// Human-readable description of the produced format
    fn format_name(&self) -> &'static str;

    /// The short name the format is selected by
    fn short_format_name(&self) -> &'static str;

    /// Select (and create on first reference) the section named at the
    /// start of `spec`, parsing any attribute tokens after it. With no
    /// spec, returns the default `.text` segment and stores the format's
    /// bit width in `bits`. Returns `None` when the spec names a reserved
    /// section.
    fn section(&mut self, spec: Option<&str>, pass: u32, bits: &mut u32) -> Option<SegmentId>;

    /// Define the label `name` at `offset` within `segment`. For
    /// [`LabelKind::Common`], `offset` is the variable's size instead.
    fn define_label(
        &mut self,
        name: &str,
        segment: Option<SegmentId>,
        offset: i64,
        kind: LabelKind,
    );

    /// Emit data into the section named by `segto`, or into the absolute
    /// space when `segto` is `None`. `segment` names the relocation
    /// target section or symbol, if any; `wrt` qualifications are not
    /// supported by this format.
    fn output(
        &mut self,
        segto: Option<SegmentId>,
        data: OutputData<'_>,
        r#type: OutputType,
        segment: Option<SegmentId>,
        wrt: Option<SegmentId>,
    );

    /// Resolve a segment to the segment its addresses are based on; this
    /// format has no segment bases, so every segment is its own base
    fn segment_base(&self, segment: SegmentId) -> SegmentId {
        segment
    }

    /// Handle a format-specific directive; this format recognizes none
    fn directive(&mut self, _name: &str, _value: &str, _pass: u32) -> bool {
        false
    }

    /// Lay out and write the object file, consuming the writer. Must be
    /// called exactly once, after the last event.
    fn finish(self) -> Result<()>
    where
        Self: Sized;
}

/// Derive the object file path for a source path by replacing its
/// extension with `.o`
pub fn object_path(source: &Path) -> PathBuf {
    source.with_extension("o")
}

/// Writer for ELF32 (i386) relocatable objects
///
/// All state lives here from construction to [`ElfWriter::finish`]:
/// the section registry, the symbol registry with its local/global
/// counters, the two string tables, and the map resolving external
/// segment IDs of undefined globals to their ordinal among globals.
pub struct ElfWriter<W>
where
    W: Write,
{
    output: W,
    reporter: Reporter,
    alloc_segment: SegmentAllocator,
    default_segment: SegmentId,
    sections: Vec<Section>,
    symbols: Vec<Symbol>,
    locals: u32,
    globals: u32,
    global_index: SparseMap,
    shstrtab: StringTable,
    strtab: StringTable,
}

impl<W> std::fmt::Debug for ElfWriter<W>
where
    W: Write,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElfWriter")
            .field("sections", &self.sections)
            .field("symbols", &self.symbols)
            .field("locals", &self.locals)
            .field("globals", &self.globals)
            .finish_non_exhaustive()
    }
}

impl<W> ElfWriter<W>
where
    W: Write,
{
    /// Create a writer emitting to `output` for the source file `source`,
    /// discarding diagnostics
    pub fn new(output: W, source: impl AsRef<Path>) -> Self {
        Self::with_options(output, source, Box::new(|_, _| {}), default_allocator())
    }

    /// Create a writer that reports diagnostics through `reporter`
    pub fn with_reporter(output: W, source: impl AsRef<Path>, reporter: Reporter) -> Self {
        Self::with_options(output, source, reporter, default_allocator())
    }

    /// Create a writer with an explicit diagnostic reporter and segment-ID
    /// allocator. A front end that allocates segment IDs of its own must
    /// share its allocator here so the IDs cannot collide.
    pub fn with_options(
        output: W,
        source: impl AsRef<Path>,
        reporter: Reporter,
        mut alloc_segment: SegmentAllocator,
    ) -> Self {
        let module = source
            .as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut strtab = StringTable::new();
        strtab.add(&module);
        let default_segment = alloc_segment();
        Self {
            output,
            reporter,
            alloc_segment,
            default_segment,
            sections: Vec::new(),
            symbols: Vec::new(),
            locals: 0,
            globals: 0,
            global_index: SparseMap::new(),
            shstrtab: StringTable::new(),
            strtab,
        }
    }

    fn report(&mut self, severity: Severity, message: &str) {
        (self.reporter)(severity, message);
    }

    fn find_section(&self, segment: SegmentId) -> Option<usize> {
        self.sections.iter().position(|s| s.index == segment)
    }

    fn make_section(
        &mut self,
        name: &str,
        kind: SectionHeaderType,
        flags: SectionFlags,
        align: u32,
    ) -> usize {
        let index = if name == ".text" {
            self.default_segment
        } else {
            (self.alloc_segment)()
        };
        let name_offset = self.shstrtab.add(name);
        debug!("created section `{name}' as segment {index} ({kind:?}, {flags:?}, align {align})");
        self.sections
            .push(Section::new(name, index, kind, flags, align, name_offset));
        self.sections.len() - 1
    }

    /// Select a section; see [`OutputFormat::section`]
    pub fn section(&mut self, spec: Option<&str>, pass: u32, bits: &mut u32) -> Option<SegmentId> {
        let mut tokens = spec.map(str::split_whitespace);
        let Some(name) = tokens.as_mut().and_then(Iterator::next) else {
            // Default is 32 bits.
            *bits = 32;
            return Some(self.default_segment);
        };

        let attrs = tokens
            .map(|rest| {
                SectionAttributes::parse(rest, |severity, message| {
                    (self.reporter)(severity, message)
                })
            })
            .unwrap_or_default();

        if RESERVED_NAMES.contains(&name) {
            let message = format!("attempt to redefine reserved section name `{name}'");
            self.report(Severity::NonFatal, &message);
            return None;
        }

        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => {
                if pass == 1 && !attrs.is_empty() {
                    let message =
                        format!("section attributes ignored on redeclaration of section `{name}'");
                    self.report(Severity::Warning, &message);
                }
                index
            }
            None => {
                let (kind, flags, align) = defaults_for(name);
                self.make_section(
                    name,
                    attrs.kind.unwrap_or(kind),
                    attrs.apply_flags(flags),
                    attrs.align.unwrap_or(align),
                )
            }
        };

        Some(self.sections[index].index)
    }

    /// Define a label; see [`OutputFormat::define_label`]
    pub fn define_label(
        &mut self,
        name: &str,
        segment: Option<SegmentId>,
        offset: i64,
        kind: LabelKind,
    ) {
        // Names in the `..' namespace are front-end pseudo-labels and are
        // never emitted.
        if name.starts_with("..") {
            return;
        }

        let strpos = self.strtab.add(name);
        let section = match segment {
            None => SHN_ABS,
            Some(segment) => self
                .find_section(segment)
                .map(|i| (i + 1) as u16)
                .unwrap_or(SHN_UNDEF),
        };

        let binding = match kind {
            LabelKind::Local => SymbolBinding::Local,
            LabelKind::Global | LabelKind::Common => SymbolBinding::Global,
        };
        let (section, value) = if kind == LabelKind::Common {
            (SHN_COMMON, offset as u32)
        } else if section == SHN_UNDEF {
            (section, 0)
        } else {
            (section, offset as u32)
        };

        if binding == SymbolBinding::Global {
            if section == SHN_UNDEF || section == SHN_COMMON {
                if let Some(segment) = segment {
                    self.global_index.write(segment, self.globals);
                }
            }
            self.globals += 1;
        } else {
            self.locals += 1;
        }

        self.symbols.push(Symbol {
            strpos,
            section,
            binding,
            value,
        });
    }

    fn add_reloc(&mut self, index: usize, segment: Option<SegmentId>, relative: bool) {
        let target = match segment {
            None => RelocTarget::FileAnchor,
            Some(segment) => match self.find_section(segment) {
                Some(i) => RelocTarget::Section(i),
                None => RelocTarget::Global(self.global_index.read(segment)),
            },
        };
        let section = &mut self.sections[index];
        section.relocs.push(Reloc {
            address: section.len,
            target,
            relative,
        });
    }

    /// Handle an output event; see [`OutputFormat::output`]
    pub fn output(
        &mut self,
        segto: Option<SegmentId>,
        data: OutputData<'_>,
        r#type: OutputType,
        segment: Option<SegmentId>,
        wrt: Option<SegmentId>,
    ) {
        if wrt.is_some() {
            // continue to do _something_
            self.report(Severity::NonFatal, "WRT not supported by ELF output format");
        }

        // absolute-assembly (structure definitions)
        let Some(segto) = segto else {
            if r#type.kind() != Some(OutputKind::Reserve) {
                self.report(
                    Severity::NonFatal,
                    "attempt to assemble code in [ABSOLUTE] space",
                );
            }
            return;
        };

        let index = match self.find_section(segto) {
            Some(index) => index,
            None => {
                let mut bits = 0;
                if self.section(Some(".text"), 2, &mut bits) != Some(segto) {
                    self.report(Severity::Panic, "strange segment conditions in ELF driver");
                    return;
                }
                self.sections.len() - 1
            }
        };

        let Some(kind) = r#type.kind() else {
            return;
        };
        let size = r#type.size();

        if self.sections[index].kind == SectionHeaderType::NoBits && kind != OutputKind::Reserve {
            let message = format!(
                "attempt to initialise memory in BSS section `{}': ignored",
                self.sections[index].name
            );
            self.report(Severity::Warning, &message);
            let count = match kind {
                OutputKind::Rel2Adr => 2,
                OutputKind::Rel4Adr => 4,
                _ => size,
            };
            self.sections[index].advance(count);
            return;
        }

        match kind {
            OutputKind::Reserve => {
                if self.sections[index].kind == SectionHeaderType::ProgramBits {
                    let message = format!(
                        "uninitialised space declared in non-BSS section `{}': zeroing",
                        self.sections[index].name
                    );
                    self.report(Severity::Warning, &message);
                    self.sections[index].write_zeroes(size);
                } else {
                    self.sections[index].advance(size);
                }
            }
            OutputKind::RawData => {
                if segment.is_some() {
                    self.report(Severity::Panic, "raw data output carries a target segment");
                    return;
                }
                self.sections[index].write(data.bytes());
            }
            OutputKind::Address => {
                if let Some(segment) = segment {
                    if segment & 1 != 0 {
                        self.report(
                            Severity::NonFatal,
                            "ELF format does not support segment base references",
                        );
                    } else if size == 2 {
                        self.report(
                            Severity::NonFatal,
                            "ELF format does not support 16-bit relocations",
                        );
                    } else {
                        self.add_reloc(index, Some(segment), false);
                    }
                }
                let word = (data.value() as u32).to_le_bytes();
                let count = (size as usize).min(word.len());
                self.sections[index].write(&word[..count]);
            }
            OutputKind::Rel2Adr => {
                self.report(
                    Severity::NonFatal,
                    "ELF format does not support 16-bit relocations",
                );
            }
            OutputKind::Rel4Adr => {
                if segment == Some(segto) {
                    self.report(Severity::Panic, "intra-segment PC-relative relocation");
                    return;
                }
                match segment {
                    Some(segment) if segment & 1 != 0 => {
                        self.report(
                            Severity::NonFatal,
                            "ELF format does not support segment base references",
                        );
                    }
                    _ => self.add_reloc(index, segment, true),
                }
                let word = ((data.value() - 4) as u32).to_le_bytes();
                self.sections[index].write(&word);
            }
        }
    }

    /// Lay out and write the object file; see [`OutputFormat::finish`]
    pub fn finish(self) -> Result<()> {
        let Self {
            mut output,
            mut shstrtab,
            strtab,
            sections,
            symbols,
            locals,
            ..
        } = self;

        // Work out how many sections the file will have: SHN_UNDEF, the
        // user sections, the four fixed sections, and one relocation
        // section per user section that needs one.
        let nsects = sections.len();
        let mut nsections = 5 + nsects;

        let comment_name = shstrtab.add(".comment");
        let shstrtab_name = shstrtab.add(".shstrtab");
        let symtab_name = shstrtab.add(".symtab");
        let strtab_name = shstrtab.add(".strtab");
        let mut rel_names: Vec<Option<u32>> = vec![None; nsects];
        for (i, section) in sections.iter().enumerate() {
            if !section.relocs.is_empty() {
                nsections += 1;
                rel_names[i] = Some(shstrtab.add_prefixed(".rel", &section.name));
            }
        }

        let mut comment = vec![0u8];
        comment.extend_from_slice(format!("The Netwide Assembler {ASSEMBLER_VERSION}").as_bytes());
        comment.push(0);

        let (symtab, first_global) = build_symtab(&symbols, nsects)?;
        let mut reltabs: Vec<Option<ByteStream>> = Vec::with_capacity(nsects);
        for section in &sections {
            reltabs.push(if section.relocs.is_empty() {
                None
            } else {
                Some(build_reltab(&section.relocs, nsects, locals)?)
            });
        }

        debug!(
            "writing {nsections} sections, {} symbol table entries ({first_global} before the first global)",
            symtab.len() / SymbolEntry::SIZE
        );

        ElfHeader::builder()
            .section_header_entry_count(ElfHalfWord(nsections as u16))
            .section_name_string_table_index(ElfHalfWord(nsects as u16 + 2))
            .build()
            .to_writer(&mut output)?;
        // pad out to the section header table at 0x40
        output.write_all(&ZERO_PAD[..12])?;

        // Section payloads start after the header table, on an alignment
        // boundary. Each header remembers its payload source; payloads are
        // streamed in header order afterwards.
        let mut foffs = (ElfHeader::SIZE + 12 + SectionHeader::SIZE * nsections) as u32;
        let lead_padding = (align_up(foffs) - foffs) as usize;
        foffs += lead_padding as u32;

        let mut payloads: Vec<Option<&[u8]>> = Vec::with_capacity(nsections);

        SectionHeader::builder()
            .address_align(ElfWord(0))
            .build()
            .to_writer(&mut output)?;
        payloads.push(None);

        for section in &sections {
            SectionHeader::builder()
                .name(ElfWord(section.name_offset))
                .r#type(section.kind)
                .flags(section.flags)
                .offset(ElfWord(foffs))
                .size(ElfWord(section.len))
                .address_align(ElfWord(section.align))
                .build()
                .to_writer(&mut output)?;
            match section.data.as_ref() {
                Some(data) => {
                    foffs += align_up(section.len);
                    payloads.push(Some(data.as_bytes()));
                }
                None => payloads.push(None),
            }
        }

        write_table_header(
            &mut output,
            &mut foffs,
            comment_name,
            SectionHeaderType::ProgramBits,
            comment.len() as u32,
            0,
            0,
            1,
            0,
        )?;
        payloads.push(Some(&comment));

        write_table_header(
            &mut output,
            &mut foffs,
            shstrtab_name,
            SectionHeaderType::StringTable,
            shstrtab.len() as u32,
            0,
            0,
            1,
            0,
        )?;
        payloads.push(Some(shstrtab.as_bytes()));

        write_table_header(
            &mut output,
            &mut foffs,
            symtab_name,
            SectionHeaderType::SymbolTable,
            symtab.len() as u32,
            nsects as u32 + 4,
            first_global,
            4,
            SymbolEntry::SIZE as u32,
        )?;
        payloads.push(Some(symtab.as_bytes()));

        write_table_header(
            &mut output,
            &mut foffs,
            strtab_name,
            SectionHeaderType::StringTable,
            strtab.len() as u32,
            0,
            0,
            1,
            0,
        )?;
        payloads.push(Some(strtab.as_bytes()));

        for (i, reltab) in reltabs.iter().enumerate() {
            let Some(reltab) = reltab.as_ref() else {
                continue;
            };
            let Some(name) = rel_names[i] else {
                continue;
            };
            write_table_header(
                &mut output,
                &mut foffs,
                name,
                SectionHeaderType::RelocationImplicit,
                reltab.len() as u32,
                nsects as u32 + 3,
                i as u32 + 1,
                4,
                RelocationEntry::SIZE as u32,
            )?;
            payloads.push(Some(reltab.as_bytes()));
        }

        output.write_all(&ZERO_PAD[..lead_padding])?;

        for payload in payloads.into_iter().flatten() {
            let padding = (align_up(payload.len() as u32) as usize) - payload.len();
            trace!("streaming {} payload bytes + {padding} padding", payload.len());
            output.write_all(payload)?;
            output.write_all(&ZERO_PAD[..padding])?;
        }

        output.flush()?;
        Ok(())
    }
}

impl<W> OutputFormat for ElfWriter<W>
where
    W: Write,
{
    fn format_name(&self) -> &'static str {
        "ELF32 (i386) object files (e.g. Linux)"
    }

    fn short_format_name(&self) -> &'static str {
        "elf"
    }

    fn section(&mut self, spec: Option<&str>, pass: u32, bits: &mut u32) -> Option<SegmentId> {
        ElfWriter::section(self, spec, pass, bits)
    }

    fn define_label(
        &mut self,
        name: &str,
        segment: Option<SegmentId>,
        offset: i64,
        kind: LabelKind,
    ) {
        ElfWriter::define_label(self, name, segment, offset, kind)
    }

    fn output(
        &mut self,
        segto: Option<SegmentId>,
        data: OutputData<'_>,
        r#type: OutputType,
        segment: Option<SegmentId>,
        wrt: Option<SegmentId>,
    ) {
        ElfWriter::output(self, segto, data, r#type, segment, wrt)
    }

    fn finish(self) -> Result<()> {
        ElfWriter::finish(self)
    }
}

fn default_allocator() -> SegmentAllocator {
    let mut next = 0;
    Box::new(move || {
        let segment = next;
        next += 2;
        segment
    })
}

fn align_up(offset: u32) -> u32 {
    (offset + (SEGMENT_ALIGN - 1)) & !(SEGMENT_ALIGN - 1)
}

// Locals must precede globals: the linker takes the symbol table's info
// field as the index of the first non-local entry.
fn build_symtab(symbols: &[Symbol], nsects: usize) -> Result<(ByteStream, u32)> {
    let mut table = ByteStream::new();
    let mut local = 0u32;

    // the all-zeros entry required by the ELF specification
    table.append(&[0u8; SymbolEntry::SIZE]);
    local += 1;

    // the source file name, which is the first thing in .strtab
    SymbolEntry {
        name: ElfWord(1),
        info: ElfByte(STT_FILE),
        shndx: ElfHalfWord(SHN_ABS),
        ..Default::default()
    }
    .to_writer(&mut table)?;
    local += 1;

    // one SECTION symbol per segment for relocation purposes, led by an
    // absolute anchor
    for i in 1..=nsects + 1 {
        SymbolEntry {
            info: ElfByte(STT_SECTION),
            shndx: ElfHalfWord(if i == 1 { SHN_ABS } else { (i - 1) as u16 }),
            ..Default::default()
        }
        .to_writer(&mut table)?;
        local += 1;
    }

    for symbol in symbols.iter().filter(|s| s.binding == SymbolBinding::Local) {
        symbol_entry(symbol).to_writer(&mut table)?;
        local += 1;
    }

    for symbol in symbols
        .iter()
        .filter(|s| s.binding == SymbolBinding::Global)
    {
        symbol_entry(symbol).to_writer(&mut table)?;
    }

    Ok((table, local))
}

fn symbol_entry(symbol: &Symbol) -> SymbolEntry {
    SymbolEntry {
        name: ElfWord(symbol.strpos),
        value: ElfWord(symbol.value),
        size: ElfWord(if symbol.section == SHN_COMMON {
            symbol.value
        } else {
            0
        }),
        info: ElfByte(symbol.binding as u8),
        other: ElfByte(0),
        shndx: ElfHalfWord(symbol.section),
    }
}

fn build_reltab(relocs: &[Reloc], nsects: usize, locals: u32) -> Result<ByteStream> {
    let mut table = ByteStream::new();
    for reloc in relocs {
        // Fixed and SECTION symbol slots are known; a global's slot is its
        // ordinal pushed past the local region of the symbol table.
        let symbol = match reloc.target {
            RelocTarget::FileAnchor => 2,
            RelocTarget::Section(i) => i as u32 + 3,
            RelocTarget::Global(ordinal) => ordinal + nsects as u32 + 3 + locals,
        };
        RelocationEntry::new(reloc.address, symbol, reloc.relative).to_writer(&mut table)?;
    }
    Ok(table)
}

#[allow(clippy::too_many_arguments)]
fn write_table_header<W>(
    output: &mut W,
    foffs: &mut u32,
    name: u32,
    r#type: SectionHeaderType,
    len: u32,
    link: u32,
    info: u32,
    align: u32,
    entry_size: u32,
) -> Result<()>
where
    W: Write,
{
    SectionHeader::builder()
        .name(ElfWord(name))
        .r#type(r#type)
        .offset(ElfWord(*foffs))
        .size(ElfWord(len))
        .link(ElfWord(link))
        .info(ElfWord(info))
        .address_align(ElfWord(align))
        .entry_size(ElfWord(entry_size))
        .build()
        .to_writer(output)?;
    *foffs += align_up(len);
    Ok(())
}
