use crate::prelude::*;
use crate::config::InstructionIndex;

/// Represents the various possible runtime error-kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// The program is not in a state that allows the requested transition.
    NotReady,
    /// The program has no instructions.
    EmptyProgram,
    /// No program with the given id or name is registered.
    UnknownProgram,
    /// The program counter ran past the last instruction.
    Overrun,
    MemoryOutOfBounds(usize),
    InvalidRegister(usize),
    /// The operand does not match what the opcode expects.
    InvalidOperand,
    CallStackOverflow,
}

impl Display for RuntimeErrorKind {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeErrorKind::NotReady => write!(f, "Program state is not ready"),
            RuntimeErrorKind::EmptyProgram => write!(f, "Program has no instructions"),
            RuntimeErrorKind::UnknownProgram => write!(f, "Unknown program"),
            RuntimeErrorKind::Overrun => write!(f, "Program counter past the last instruction"),
            RuntimeErrorKind::MemoryOutOfBounds(address) => write!(f, "Memory address {} out of bounds", address),
            RuntimeErrorKind::InvalidRegister(index) => write!(f, "Invalid register r{}", index),
            RuntimeErrorKind::InvalidOperand => write!(f, "Invalid operand"),
            RuntimeErrorKind::CallStackOverflow => write!(f, "Call stack overflow"),
        }
    }
}

/// An error reported by the runtime.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("program '{program}' at instruction {instruction}: {kind}")]
pub struct RuntimeError {
    kind        : RuntimeErrorKind,
    program     : String,
    instruction : InstructionIndex,
}

impl RuntimeError {
    pub(crate) fn new(kind: RuntimeErrorKind, program: &str, instruction: InstructionIndex) -> RuntimeError {
        Self { kind, program: program.to_string(), instruction }
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> RuntimeErrorKind {
        self.kind
    }
    /// Name of the program that raised the error.
    pub fn program(self: &Self) -> &str {
        &self.program
    }
    /// Index of the instruction being executed when the error occurred.
    pub fn instruction(self: &Self) -> InstructionIndex {
        self.instruction
    }
}

pub type RuntimeResult<T = ()> = Result<T, RuntimeError>;
