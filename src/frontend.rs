//! Compiler frontend. Turns source text into tokens and tokens into a statement AST.

pub mod lexer;
pub mod ast;
pub mod parser;
