
pub use crate::shared::{ErrorPolicy, error::Error, bounded::{BoundedString, TooLong}};

#[cfg(feature="compiler")]
pub mod lexer {
    //! Source tokenization.
    pub use crate::frontend::lexer::{tokenize, tokenize_with, Lexed, token::{Token, TokenKind}, error::{LexError, LexErrorKind, LexResult}};
}

#[cfg(feature="compiler")]
pub mod parser {
    //! Token parsing.
    pub use crate::frontend::parser::{is_complete, parse, parse_strict, parse_with, Parsed, error::{ParseError, ParseErrorKind, ParseResult, Severity}};
}

#[cfg(feature="compiler")]
pub mod ast {
    //! Abstract syntax tree representation.
    pub use crate::frontend::ast::*;
}

#[cfg(feature="compiler")]
pub mod assembler {
    //! Mnemonic assembly to executable images.
    pub use crate::bytecode::assembler::{assemble, error::{AssembleError, AssembleErrorKind, AssembleResult}};
}

pub mod executable {
    //! Executable images and the instruction set.
    pub use crate::bytecode::{Program, Section, SectionKind, Instruction, Operand, OperandKind, OpCode, cond};
    pub use crate::bytecode::error::{LoadError, LoadResult};
}

#[cfg(feature="runtime")]
pub mod runtime {
    //! Program registry and execution.
    pub use crate::bytecode::runtime::{Engine, EngineConfig, ProgramRegistry, VMProgram, ProgramState};
    pub use crate::bytecode::runtime::error::{RuntimeError, RuntimeErrorKind, RuntimeResult};
    pub use crate::shared::typed_ids::ProgramId;
}
