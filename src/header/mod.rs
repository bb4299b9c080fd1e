//! Fixed-size header records of the ELF container

pub mod elf;
pub mod section;
