use crate::util::*;

#[test]
fn countdown_loop() {
    let result = run_i32("
            ldi 1
            put r1          ; decrement
            ldi 0
            put r2          ; iterations
            ldi 5
        loop:
            subi r1
            put r3
            get r2
            inci
            put r2
            get r3
            jmp.p loop
            halt
    ");
    assert_eq!(result[0], 0);
    assert_eq!(result[2], 5);
}

#[test]
fn predicated_instruction_is_skipped() {
    let result = run_i32("
        ldi 1
        ldi.n 99
        halt
    ");
    assert_eq!(result[0], 1);
}

#[test]
fn predicated_instruction_runs_on_match() {
    let result = run_i32("
        ldi -1
        ldi.nz 99
        halt
    ");
    assert_eq!(result[0], 99);
}

#[test]
fn call_and_return() {
    let program = run("
            call double
            call double
            halt
        double:
            ldi 2
            put r1
            get r2
            inci
            muli r1
            put r2
            return
    ");
    // r2 = ((0 + 1) * 2 + 1) * 2
    assert_eq!(program.register_i32(2).unwrap(), 6);
    assert_eq!(program.call_depth(), 0);
    assert_eq!(program.state(), ProgramState::Halted);
}

#[test]
fn return_without_call_halts() {
    let program = run("ldi 7\nreturn\nldi 8");
    assert_eq!(program.state(), ProgramState::Halted);
    assert_eq!(program.register_i32(0).unwrap(), 7);
}

#[test]
fn halt_stops_execution() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, "halt\nldi 1");
    engine.tick(&mut registry);
    assert_eq!(registry.get(id).unwrap().state(), ProgramState::Halted);
    let ticks = registry.get(id).unwrap().tick_count();
    engine.tick(&mut registry);
    assert_eq!(registry.get(id).unwrap().tick_count(), ticks);
    assert_eq!(registry.get(id).unwrap().program_counter(), 0);
}

#[test]
fn call_depth_is_bounded() {
    let engine = Engine::new(EngineConfig { max_call_depth: 4, ..EngineConfig::default() });
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, "recurse:\ncall recurse");
    let mut errors = Vec::new();
    for _ in 0..10 {
        errors.extend(engine.tick(&mut registry));
    }
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), RuntimeErrorKind::CallStackOverflow);
    assert_eq!(errors[0].instruction(), 0);
    assert!(registry.get(id).is_none());
}

#[test]
fn budget_executes_multiple_instructions_per_tick() {
    let engine = Engine::new(EngineConfig { instructions_per_tick: 3, ..EngineConfig::default() });
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, "ldi 1\ninci\ninci\ninci\nhalt");
    engine.tick(&mut registry);
    let program = registry.get(id).unwrap();
    assert_eq!(program.program_counter(), 3);
    assert_eq!(program.register_i32(0).unwrap(), 3);
    engine.tick(&mut registry);
    let program = registry.get(id).unwrap();
    assert_eq!(program.state(), ProgramState::Halted);
    assert_eq!(program.register_i32(0).unwrap(), 4);
    assert_eq!(program.tick_count(), 2);
}

#[test]
fn unknown_opcode_is_ignored() {
    let mut program = assemble("ldi 1\nnop\nhalt").unwrap().to_bytes();
    // the nop is the second instruction: header (12) + ldi (3 + 4)
    assert_eq!(program[19], OpCode::NOP as u8);
    program[19] = 0xee;
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = engine.load_bytes(&mut registry, "unknown", &program).unwrap();
    assert_eq!(registry.get(id).unwrap().instructions()[1].opcode(), None);
    engine.execute(&mut registry, id).unwrap();
    run_to_end(&engine, &mut registry, id, 10);
    assert_eq!(registry.get(id).unwrap().state(), ProgramState::Halted);
}

#[test]
fn jump_past_end_overruns_at_the_jump() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    start(&engine, &mut registry, "nop\njmp 100");
    assert!(engine.tick(&mut registry).is_empty());
    let errors = engine.tick(&mut registry);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), RuntimeErrorKind::Overrun);
    assert_eq!(errors[0].instruction(), 1);
    assert!(registry.is_empty());
}

#[test]
fn call_past_end_overruns_at_the_call() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    start(&engine, &mut registry, "call 1");
    let errors = engine.tick(&mut registry);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), RuntimeErrorKind::Overrun);
    assert_eq!(errors[0].instruction(), 0);
    assert!(registry.is_empty());
}

#[test]
fn return_past_end_overruns_at_the_return() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    // the call is the last instruction, so its return address is past the end
    start(&engine, &mut registry, "
            jmp start
        sub:
            return
        start:
            call sub
    ");
    assert!(engine.tick(&mut registry).is_empty());
    assert!(engine.tick(&mut registry).is_empty());
    let errors = engine.tick(&mut registry);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), RuntimeErrorKind::Overrun);
    assert_eq!(errors[0].instruction(), 1);
    assert!(registry.is_empty());
}

#[test]
fn program_counter_stays_in_range() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, "loop:\ninci\njmp loop");
    for _ in 0..20 {
        assert!(engine.tick(&mut registry).is_empty());
        let program = registry.get(id).unwrap();
        assert!(program.is_running());
        assert!((program.program_counter() as usize) < program.instructions().len());
    }
}
