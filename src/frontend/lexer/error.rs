use std::sync::Arc;
use crate::prelude::*;

/// Represents the various possible lexer error-kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedComment,
    MalformedNumber,
    TokenTooLong,
}

impl Display for LexErrorKind {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => write!(f, "Unterminated string literal"),
            LexErrorKind::UnterminatedComment => write!(f, "Unterminated block comment"),
            LexErrorKind::MalformedNumber => write!(f, "Numeric literal contains more than one '.'"),
            LexErrorKind::TokenTooLong => write!(f, "Token exceeds {} bytes", crate::config::MAX_TOKEN_LEN),
        }
    }
}

/// An error reported by the lexer.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{file}:{line}:{column}: {kind}")]
pub struct LexError {
    kind    : LexErrorKind,
    file    : Arc<str>,
    line    : u32,
    column  : u32,
}

impl LexError {
    pub(crate) fn new(kind: LexErrorKind, file: Arc<str>, line: u32, column: u32) -> LexError {
        Self { kind, file, line, column }
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> LexErrorKind {
        self.kind
    }
    /// Source file tag the error occured in.
    pub fn file(self: &Self) -> &str {
        &self.file
    }
    /// 1-based line/column of the start of the offending input.
    pub fn loc(self: &Self) -> (u32, u32) {
        (self.line, self.column)
    }
}

pub type LexResult<T = ()> = Result<T, LexError>;
