use std::path::PathBuf;
use crate::shared::bounded::TooLong;

/// An error reported while reading or decoding an executable.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Not a yang executable")]
    BadMagic,
    #[error("Unsupported executable version {0}")]
    UnsupportedVersion(u16),
    #[error("Invalid number of sections {0}")]
    InvalidSectionCount(u16),
    #[error("Unexpected end of executable")]
    Truncated,
    #[error("Invalid operand type tag {0}")]
    InvalidOperandTag(u8),
    #[error("Operand string is not valid UTF-8")]
    InvalidString,
    #[error("Invalid program name: {0}")]
    InvalidName(TooLong),
    #[error("Program registry is full")]
    RegistryFull,
}

pub type LoadResult<T = ()> = Result<T, LoadError>;
