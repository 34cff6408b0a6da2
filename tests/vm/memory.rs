use crate::util::*;

#[test]
fn store_and_load() {
    let program = run("
        ldi 1234
        store 16383
        ldi 0
        load 16383
        put r5
        halt
    ");
    assert_eq!(program.register_i32(5).unwrap(), 1234);
    assert_eq!(program.read_memory(16383).unwrap(), 1234);
    assert_eq!(program.read_memory(0).unwrap(), 0);
}

#[test]
fn load_sets_condition() {
    assert_eq!(run("ldi -2\nstore 3\nldi 1\nload 3\nhalt").cond(), cond::NEG);
}

#[test]
fn out_of_bounds_access_terminates_program() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, "ldi 1\nstore 16384\nhalt");
    let other = load(&engine, &mut registry, "other", "ldi 5\nhalt");
    engine.execute(&mut registry, other).unwrap();
    assert!(engine.tick(&mut registry).is_empty());
    let errors = engine.tick(&mut registry);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), RuntimeErrorKind::MemoryOutOfBounds(16384));
    assert_eq!(errors[0].program(), "test");
    assert_eq!(errors[0].instruction(), 1);
    assert!(registry.get(id).is_none());
    // the other program was not affected
    assert_eq!(registry.get(other).unwrap().state(), ProgramState::Halted);
    assert_eq!(errors[0].to_string(), "program 'test' at instruction 1: Memory address 16384 out of bounds");
}

#[test]
fn host_memory_access_is_bounds_checked() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = load(&engine, &mut registry, "host", "halt");
    let program = registry.get_mut(id).unwrap();
    program.write_memory(100, 7).unwrap();
    assert_eq!(program.read_memory(100).unwrap(), 7);
    assert_eq!(program.read_memory(16384).unwrap_err().kind(), RuntimeErrorKind::MemoryOutOfBounds(16384));
    assert_eq!(program.write_memory(usize::MAX, 1).unwrap_err().kind(), RuntimeErrorKind::MemoryOutOfBounds(usize::MAX));
}

#[test]
fn host_register_access_is_bounds_checked() {
    let program = run("ldi 3\nput r7\nhalt");
    assert_eq!(program.register(7).unwrap(), 3);
    assert_eq!(program.register(8).unwrap_err().kind(), RuntimeErrorKind::InvalidRegister(8));
}

#[test]
fn invalid_register_operand_terminates_program() {
    // register operands are validated by the assembler, so patch the image directly
    let mut image = assemble("put r1").unwrap().to_bytes();
    let operand = image.len() - 1;
    image[operand] = 9;
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = engine.load_bytes(&mut registry, "bad", &image).unwrap();
    engine.execute(&mut registry, id).unwrap();
    let errors = engine.tick(&mut registry);
    assert_eq!(errors[0].kind(), RuntimeErrorKind::InvalidRegister(9));
    assert!(registry.is_empty());
}

#[test]
fn invalid_operand_type_terminates_program() {
    let program = Program::new(vec![ Instruction::new(OpCode::LOAD_I32, Operand::Str("text".to_string())) ]);
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = engine.load_program(&mut registry, "typed", &program).unwrap();
    engine.execute(&mut registry, id).unwrap();
    let errors = engine.tick(&mut registry);
    assert_eq!(errors[0].kind(), RuntimeErrorKind::InvalidOperand);
}
