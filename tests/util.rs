#![allow(dead_code)]

pub use yang::{ErrorPolicy, Error};
pub use yang::lexer::{tokenize, tokenize_with, Token, TokenKind, LexErrorKind};
pub use yang::parser::{is_complete, parse, parse_strict, parse_with, ParseErrorKind, Severity};
pub use yang::config::{MAX_NESTING, MAX_SYMBOL_LEN};
pub use yang::ast::*;
pub use yang::assembler::{assemble, AssembleErrorKind};
pub use yang::executable::{Program, Instruction, Operand, OpCode, LoadError, cond};
pub use yang::runtime::{Engine, EngineConfig, ProgramRegistry, ProgramState, ProgramId, RuntimeErrorKind, VMProgram};

/// Lexes source and returns the token kinds.
pub fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, "test").unwrap().iter().map(|token| token.kind).collect()
}

/// Lexes source and returns the token texts, excluding end of file.
pub fn texts(source: &str) -> Vec<String> {
    tokenize(source, "test").unwrap().iter().filter(|token| token.kind != TokenKind::Eof).map(|token| token.text().to_string()).collect()
}

/// Lexes and parses source, returning the top level statements.
pub fn statements(source: &str) -> Vec<Statement> {
    let tokens = tokenize(source, "test").unwrap();
    parse_strict(&tokens).unwrap().children().to_vec()
}

/// Returns the opcodes of an assembled program.
pub fn opcodes(program: &Program) -> Vec<OpCode> {
    program.instructions().iter().map(|instruction| instruction.opcode().unwrap()).collect()
}

/// Assembles source and registers the resulting image under the given name.
pub fn load(engine: &Engine, registry: &mut ProgramRegistry, name: &str, source: &str) -> ProgramId {
    let image = assemble(source).unwrap().to_bytes();
    engine.load_bytes(registry, name, &image).unwrap()
}

/// Assembles, loads and starts a program.
pub fn start(engine: &Engine, registry: &mut ProgramRegistry, source: &str) -> ProgramId {
    let id = load(engine, registry, "test", source);
    engine.execute(registry, id).unwrap();
    id
}

/// Ticks until the program stops running or is removed, failing on runtime errors or after `max_ticks`.
pub fn run_to_end(engine: &Engine, registry: &mut ProgramRegistry, id: ProgramId, max_ticks: usize) -> usize {
    for tick in 0..max_ticks {
        if !registry.get(id).map_or(false, |program| program.is_running()) {
            return tick;
        }
        let errors = engine.tick(registry);
        assert!(errors.is_empty(), "unexpected runtime errors: {:?}", errors);
    }
    panic!("program still running after {} ticks", max_ticks);
}

/// Runs a program to completion with the default engine and returns the final instance.
pub fn run(source: &str) -> VMProgram {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, source);
    run_to_end(&engine, &mut registry, id, 10_000);
    registry.get(id).unwrap().clone()
}

/// Runs a program to completion and returns general purpose registers as i32.
pub fn run_i32(source: &str) -> Vec<i32> {
    let program = run(source);
    (0..8).map(|index| program.register_i32(index).unwrap()).collect()
}
