use crate::prelude::*;

/// Represents the various possible assembler error-kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum AssembleErrorKind {
    /// Line is neither a label, an instruction nor a comment.
    Syntax(String),
    DuplicateLabel(String),
    UndefinedLabel(String),
    InvalidLabel(String),
    /// Mnemonic requires an operand.
    MissingOperand(&'static str),
    /// Mnemonic takes no operand but one was given.
    UnexpectedOperand(String),
    InvalidOperand(String),
    InvalidCondition(String),
    /// Program exceeds the addressable number of instructions.
    TooManyInstructions,
}

impl Display for AssembleErrorKind {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssembleErrorKind::Syntax(line) => write!(f, "Syntax error: '{}'", line),
            AssembleErrorKind::DuplicateLabel(label) => write!(f, "Duplicate label '{}'", label),
            AssembleErrorKind::UndefinedLabel(label) => write!(f, "Undefined label '{}'", label),
            AssembleErrorKind::InvalidLabel(label) => write!(f, "Invalid label name '{}'", label),
            AssembleErrorKind::MissingOperand(mnemonic) => write!(f, "Missing operand for '{}'", mnemonic),
            AssembleErrorKind::UnexpectedOperand(operand) => write!(f, "Unexpected operand '{}'", operand),
            AssembleErrorKind::InvalidOperand(operand) => write!(f, "Invalid operand '{}'", operand),
            AssembleErrorKind::InvalidCondition(condition) => write!(f, "Invalid condition '{}', expected a combination of p, z and n", condition),
            AssembleErrorKind::TooManyInstructions => write!(f, "Too many instructions"),
        }
    }
}

/// An error reported by the assembler.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct AssembleError {
    kind: AssembleErrorKind,
    line: u32,
}

impl AssembleError {
    pub(crate) fn new(kind: AssembleErrorKind, line: u32) -> AssembleError {
        Self { kind, line }
    }
    /// 1-based line number of the offending source line.
    pub fn line(self: &Self) -> u32 {
        self.line
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &AssembleErrorKind {
        &self.kind
    }
}

pub type AssembleResult<T = ()> = Result<T, AssembleError>;
