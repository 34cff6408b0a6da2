use std::sync::Arc;
use crate::prelude::*;
use crate::frontend::ast::Position;

/// Represents the various possible parser error-kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// Found a token that does not fit the grammar at this point.
    UnexpectedToken { expected: &'static str, found: String },
    /// An `end` names a different block than the one it closes.
    NameMismatch { expected: String, found: String },
    InvalidNumber(String),
    NameTooLong(String),
    /// Module blocks are nested deeper than `MAX_NESTING`.
    NestingTooDeep,
}

impl Display for ParseErrorKind {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken { expected, found } => write!(f, "Expected {}, found {}", expected, found),
            ParseErrorKind::NameMismatch { expected, found } => write!(f, "Block '{}' closed by 'end {}'", expected, found),
            ParseErrorKind::InvalidNumber(text) => write!(f, "Invalid numeric value '{}'", text),
            ParseErrorKind::NameTooLong(name) => write!(f, "Name '{}' exceeds {} bytes", name, crate::config::MAX_SYMBOL_LEN),
            ParseErrorKind::NestingTooDeep => write!(f, "Modules nested deeper than {} levels", crate::config::MAX_NESTING),
        }
    }
}

/// Severity of a parser diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Reported but never aborts parsing.
    Warning,
    Error,
}

/// An error reported by the parser (e.g. syntax error).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{file}:{position}: {kind}")]
pub struct ParseError {
    kind        : ParseErrorKind,
    severity    : Severity,
    file        : Arc<str>,
    position    : Position,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, severity: Severity, file: Arc<str>, position: Position) -> ParseError {
        Self { kind, severity, file, position }
    }
    /// 1-based line/column number of the offending token.
    pub fn loc(self: &Self) -> (u32, u32) {
        (self.position.line, self.position.column)
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &ParseErrorKind {
        &self.kind
    }
    pub fn severity(self: &Self) -> Severity {
        self.severity
    }
    /// Source file tag of the offending token.
    pub fn file(self: &Self) -> &str {
        &self.file
    }
}

pub type ParseResult<T = ()> = Result<T, ParseError>;
