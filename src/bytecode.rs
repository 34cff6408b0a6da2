//! Bytecode: instruction model, executable images, assembler and VM runtime.

pub mod error;
pub mod instruction;
pub mod opcodes;
pub mod program;
#[cfg(feature="compiler")]
pub mod assembler;
#[cfg(feature="runtime")]
pub mod runtime;

pub use instruction::{Instruction, Operand, OperandKind, cond};
pub use opcodes::OpCode;
pub use program::{Program, Section, SectionKind};
