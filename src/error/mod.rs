//! Error and diagnostic types for the object writer

#[derive(thiserror::Error, Debug, PartialEq, Eq, Hash)]
/// Error type for errors during object file emission
pub enum Error {
    #[error("An I/O error occurred: {kind}")]
    /// An I/O error occurred while writing the object file
    Io {
        /// The kind of I/O error
        kind: std::io::ErrorKind,
    },
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io { kind: value.kind() }
    }
}

/// Result type for object file emission
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Severity of a diagnostic reported back to the assembler driver
pub enum Severity {
    /// Report and continue; the emitted object is still usable
    Warning,
    /// Report and continue best-effort; the operation was rejected or coerced
    NonFatal,
    /// Report an internal contract violation; the host treats this as
    /// unrecoverable and the writer emits nothing for the operation
    Panic,
}

/// Diagnostic callback handed to the writer by the assembler driver.
///
/// The writer never consumes its own diagnostics; it reports and keeps
/// going, so the callback decides whether to print, collect, or abort.
pub type Reporter = Box<dyn FnMut(Severity, &str)>;
