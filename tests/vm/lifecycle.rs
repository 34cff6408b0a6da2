use crate::util::*;

const COUNTER: &str = "
    loop:
        inci
        jmp loop
";

#[test]
fn execute_freeze_resume() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = load(&engine, &mut registry, "counter", COUNTER);
    assert_eq!(registry.get(id).unwrap().state(), ProgramState::Loaded);
    // loaded programs do not run
    engine.tick(&mut registry);
    assert_eq!(registry.get(id).unwrap().tick_count(), 0);

    engine.execute(&mut registry, id).unwrap();
    for _ in 0..4 {
        engine.tick(&mut registry);
    }
    engine.freeze(&mut registry, id).unwrap();
    assert_eq!(registry.get(id).unwrap().state(), ProgramState::Frozen);
    for _ in 0..4 {
        engine.tick(&mut registry);
    }
    let program = registry.get(id).unwrap();
    assert_eq!(program.register_i32(0).unwrap(), 2);
    assert_eq!(program.tick_count(), 4);

    engine.execute(&mut registry, id).unwrap();
    engine.tick(&mut registry);
    engine.tick(&mut registry);
    let program = registry.get(id).unwrap();
    assert_eq!(program.state(), ProgramState::Running);
    assert_eq!(program.register_i32(0).unwrap(), 3);
    assert_eq!(program.tick_count(), 6);
}

#[test]
fn execute_requires_loaded_or_frozen() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, "halt");
    assert_eq!(engine.execute(&mut registry, id).unwrap_err().kind(), RuntimeErrorKind::NotReady);
    engine.tick(&mut registry);
    assert_eq!(registry.get(id).unwrap().state(), ProgramState::Halted);
    assert_eq!(engine.execute(&mut registry, id).unwrap_err().kind(), RuntimeErrorKind::NotReady);
}

#[test]
fn execute_rejects_empty_program() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = engine.load_program(&mut registry, "empty", &Program::new(Vec::new())).unwrap();
    let err = engine.execute(&mut registry, id).unwrap_err();
    assert_eq!(err.kind(), RuntimeErrorKind::EmptyProgram);
    assert_eq!(err.program(), "empty");
    assert_eq!(registry.get(id).unwrap().state(), ProgramState::Loaded);
}

#[test]
fn freeze_requires_running() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = load(&engine, &mut registry, "idle", COUNTER);
    assert_eq!(engine.freeze(&mut registry, id).unwrap_err().kind(), RuntimeErrorKind::NotReady);
    engine.execute(&mut registry, id).unwrap();
    engine.freeze(&mut registry, id).unwrap();
    assert_eq!(engine.freeze(&mut registry, id).unwrap_err().kind(), RuntimeErrorKind::NotReady);
}

#[test]
fn named_operations() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let first = load(&engine, &mut registry, "worker", COUNTER);
    let second = load(&engine, &mut registry, "worker", COUNTER);
    assert_ne!(first, second);
    assert_eq!(registry.find("worker"), Some(first));
    assert_eq!(registry.get_by_name("worker").unwrap().id(), first);
    assert_eq!(registry.find("nobody"), None);

    engine.execute(&mut registry, first).unwrap();
    engine.execute(&mut registry, second).unwrap();
    engine.freeze_named(&mut registry, "worker").unwrap();
    assert_eq!(registry.get(first).unwrap().state(), ProgramState::Frozen);
    assert_eq!(registry.get(second).unwrap().state(), ProgramState::Running);

    engine.terminate_named(&mut registry, "worker").unwrap();
    assert!(registry.get(first).is_none());
    assert_eq!(registry.find("worker"), Some(second));

    let err = engine.freeze_named(&mut registry, "nobody").unwrap_err();
    assert_eq!(err.kind(), RuntimeErrorKind::UnknownProgram);
    assert_eq!(err.program(), "nobody");
    assert_eq!(engine.terminate_named(&mut registry, "nobody").unwrap_err().kind(), RuntimeErrorKind::UnknownProgram);
}

#[test]
fn terminate() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, COUNTER);
    engine.tick(&mut registry);
    engine.terminate(&mut registry, id).unwrap();
    assert!(registry.is_empty());
    // terminated programs are gone
    assert_eq!(engine.terminate(&mut registry, id).unwrap_err().kind(), RuntimeErrorKind::UnknownProgram);
    assert_eq!(engine.execute(&mut registry, id).unwrap_err().kind(), RuntimeErrorKind::UnknownProgram);
    assert_eq!(engine.freeze(&mut registry, id).unwrap_err().kind(), RuntimeErrorKind::UnknownProgram);
    assert_eq!(engine.reset(&mut registry, id).unwrap_err().kind(), RuntimeErrorKind::UnknownProgram);
}

#[test]
fn ids_are_not_reused() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let first = load(&engine, &mut registry, "a", "halt");
    engine.terminate(&mut registry, first).unwrap();
    let second = load(&engine, &mut registry, "b", "halt");
    assert_ne!(first, second);
    assert!(registry.get(first).is_none());
}

#[test]
fn reset_restores_loaded_state() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, "ldi 9\nstore 10\ncall sub\nhalt\nsub:\nhalt");
    run_to_end(&engine, &mut registry, id, 100);
    let program = registry.get(id).unwrap();
    assert_eq!(program.state(), ProgramState::Halted);
    assert_eq!(program.call_depth(), 1);

    engine.reset(&mut registry, id).unwrap();
    let program = registry.get(id).unwrap();
    assert_eq!(program.state(), ProgramState::Loaded);
    assert_eq!(program.registers(), &[ 0; 10 ]);
    assert_eq!(program.read_memory(10).unwrap(), 0);
    assert_eq!(program.call_depth(), 0);
    assert_eq!(program.tick_count(), 0);
    assert_eq!(program.instructions().len(), 5);

    // a reset program runs again from the start
    engine.execute(&mut registry, id).unwrap();
    run_to_end(&engine, &mut registry, id, 100);
    assert_eq!(registry.get(id).unwrap().read_memory(10).unwrap(), 9);
}

#[test]
fn tick_runs_programs_in_registration_order() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let a = start(&engine, &mut registry, COUNTER);
    let b = load(&engine, &mut registry, "b", "halt");
    let c = load(&engine, &mut registry, "c", COUNTER);
    engine.execute(&mut registry, c).unwrap();
    engine.tick(&mut registry);
    let ids: Vec<_> = registry.iter().map(|program| program.id()).collect();
    assert_eq!(ids, [ a, b, c ]);
    assert_eq!(registry.get(a).unwrap().tick_count(), 1);
    assert_eq!(registry.get(b).unwrap().tick_count(), 0);
    assert_eq!(registry.get(c).unwrap().tick_count(), 1);
}

#[test]
fn faulting_program_does_not_stop_others() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    // a program whose counter reaches its length before halting
    let faulty = load(&engine, &mut registry, "faulty", "nop\nnop");
    let healthy = load(&engine, &mut registry, "healthy", COUNTER);
    engine.execute(&mut registry, faulty).unwrap();
    engine.execute(&mut registry, healthy).unwrap();

    assert!(engine.tick(&mut registry).is_empty());
    assert!(engine.tick(&mut registry).is_empty());
    let errors = engine.tick(&mut registry);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), RuntimeErrorKind::Overrun);
    assert_eq!(errors[0].program(), "faulty");
    assert_eq!(errors[0].instruction(), 2);
    assert!(registry.get(faulty).is_none());

    for _ in 0..3 {
        assert!(engine.tick(&mut registry).is_empty());
    }
    let program = registry.get(healthy).unwrap();
    assert_eq!(program.state(), ProgramState::Running);
    assert_eq!(program.tick_count(), 6);
    assert_eq!(program.register_i32(0).unwrap(), 3);
}

#[test]
fn engine_config() {
    let engine = Engine::default();
    assert_eq!(engine.config().instructions_per_tick, 1);
    assert_eq!(engine.config().max_call_depth, 256);
    // a zero budget still executes one instruction per tick
    let engine = Engine::new(EngineConfig { instructions_per_tick: 0, ..EngineConfig::default() });
    let mut registry = ProgramRegistry::new();
    let id = start(&engine, &mut registry, "ldi 1\nhalt");
    engine.tick(&mut registry);
    assert_eq!(registry.get(id).unwrap().program_counter(), 1);
}
