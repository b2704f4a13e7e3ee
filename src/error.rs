//! Uniform failure values for every layer of the parser (spec §4.1, §7).
//!
//! Nothing in this crate unwinds the call stack on a malformed input: every
//! fallible operation returns a [`Result`], and [`Error`] carries a
//! [`ErrorKind`] plus a human-readable message that callers should treat as
//! opaque (never parsed).

use std::fmt;

/// The failure taxonomy from spec §4.1. `Success` is deliberately absent —
/// Rust already distinguishes success from failure via `Result`, so folding
/// it into this enum would just invite an unreachable arm everywhere it's
/// matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFileStream,
    InvalidReadSize,
    InvalidSeekOffset,
    InsufficientData,
    BadNumericCast,
    CannotReadFile,
    NotISOMediaFile,
    InvalidBoxData,
    GenericError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidFileStream => "invalid file stream",
            ErrorKind::InvalidReadSize => "invalid read size",
            ErrorKind::InvalidSeekOffset => "invalid seek offset",
            ErrorKind::InsufficientData => "insufficient data",
            ErrorKind::BadNumericCast => "bad numeric cast",
            ErrorKind::CannotReadFile => "cannot read file",
            ErrorKind::NotISOMediaFile => "not an ISO media file",
            ErrorKind::InvalidBoxData => "invalid box data",
            ErrorKind::GenericError => "generic error",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error { kind, message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        use std::io::ErrorKind as IoKind;
        let kind = match e.kind() {
            IoKind::UnexpectedEof => ErrorKind::InsufficientData,
            _ => ErrorKind::InvalidFileStream,
        };
        Error::new(kind, e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
