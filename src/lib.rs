//! Yang, a small declaration language front-end together with an assembler and a tick driven register VM
//! hosting multiple programs.
//!
//! # Pipelines
//!
//! - source text → [lexer::tokenize] → [parser::parse] → [parser::Parsed] (program and diagnostics)
//! - assembly text → [assembler::assemble] → [executable::Program] → bytes → [runtime::Engine::load]
//!
//! ```
//! use yang::{assembler::assemble, runtime::{Engine, ProgramRegistry}};
//!
//! let engine = Engine::default();
//! let mut registry = ProgramRegistry::new();
//! let program = assemble("ldi 20\nput r1\nldi 22\naddi r1\nhalt").unwrap();
//! let id = engine.load_bytes(&mut registry, "sum", &program.to_bytes()).unwrap();
//! engine.execute(&mut registry, id).unwrap();
//! for _ in 0..5 {
//!     engine.tick(&mut registry);
//! }
//! assert_eq!(registry.get_by_name("sum").unwrap().register_i32(0).unwrap(), 42);
//! ```

pub(crate) mod prelude {
    pub use std::fmt::{self, Debug, Display};
}

pub mod config;
pub(crate) mod shared;
#[cfg(feature="compiler")]
pub(crate) mod frontend;
pub(crate) mod bytecode;
mod interface;

pub use interface::*;

/// One stop shop to tokenize and parse given source code, failing on the first error.
#[cfg(feature="compiler")]
pub fn parse_str(source: &str, file: &str) -> Result<ast::Statement, Error> {
    let tokens = lexer::tokenize(source, file)?;
    Ok(parser::parse_strict(&tokens)?)
}
