use crate::util::*;
use std::fs;

fn header(version: u16, sections: u16, count: u32) -> Vec<u8> {
    let mut bytes = b"YANG".to_vec();
    bytes.extend_from_slice(&version.to_le_bytes());
    bytes.extend_from_slice(&sections.to_le_bytes());
    bytes.extend_from_slice(&count.to_le_bytes());
    bytes
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blinker.yang");
    fs::write(&path, assemble("ldi 4\nhalt").unwrap().to_bytes()).unwrap();

    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let first = engine.load(&mut registry, &path).unwrap();
    let second = engine.load(&mut registry, &path).unwrap();
    assert_ne!(first, second);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(first).unwrap().name(), "blinker");
    assert_eq!(registry.get(first).unwrap().state(), ProgramState::Loaded);
    assert_eq!(registry.get(first).unwrap().instructions(), registry.get(second).unwrap().instructions());
    assert_eq!(registry.get(first).unwrap().instructions().len(), 2);

    // instances do not share state
    engine.execute(&mut registry, first).unwrap();
    run_to_end(&engine, &mut registry, first, 10);
    assert_eq!(registry.get(first).unwrap().register_i32(0).unwrap(), 4);
    assert_eq!(registry.get(second).unwrap().register_i32(0).unwrap(), 0);
    assert_eq!(registry.get(second).unwrap().state(), ProgramState::Loaded);
}

#[test]
fn bad_magic_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bogus.yang");
    fs::write(&path, b"NOPE\x01\x00\x01\x00\x00\x00\x00\x00").unwrap();
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    assert!(matches!(engine.load(&mut registry, &path), Err(LoadError::BadMagic)));
    assert!(registry.is_empty());
    assert!(matches!(Program::from_bytes(b"YA"), Err(LoadError::BadMagic)));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yang");
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let err = engine.load(&mut registry, &path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("missing.yang"));
}

#[test]
fn name_length_is_bounded() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    let image = assemble("halt").unwrap().to_bytes();
    assert!(engine.load_bytes(&mut registry, "sixteen_chars_ok", &image).is_ok());
    assert!(matches!(engine.load_bytes(&mut registry, "seventeen_chars_x", &image), Err(LoadError::InvalidName(_))));
    assert_eq!(registry.len(), 1);
}

#[test]
fn version_is_checked() {
    assert!(matches!(Program::from_bytes(&header(0, 1, 0)), Err(LoadError::UnsupportedVersion(0))));
    assert!(matches!(Program::from_bytes(&header(2, 1, 0)), Err(LoadError::UnsupportedVersion(2))));
    assert!(Program::from_bytes(&header(1, 1, 0)).unwrap().is_empty());
}

#[test]
fn section_count_is_checked() {
    assert!(matches!(Program::from_bytes(&header(1, 0, 0)), Err(LoadError::InvalidSectionCount(0))));
    assert!(matches!(Program::from_bytes(&header(1, 16, 0)), Err(LoadError::InvalidSectionCount(16))));
    assert!(Program::from_bytes(&header(1, 15, 0)).is_ok());
}

#[test]
fn truncated_input() {
    assert!(matches!(Program::from_bytes(b"YANG\x01\x00"), Err(LoadError::Truncated)));
    // header claims two instructions, only one follows
    let mut bytes = header(1, 1, 2);
    bytes.extend_from_slice(&[ OpCode::HALT as u8, 0, 0 ]);
    assert!(matches!(Program::from_bytes(&bytes), Err(LoadError::Truncated)));
    // immediate is cut short
    let mut bytes = header(1, 1, 1);
    bytes.extend_from_slice(&[ OpCode::LOAD_I32 as u8, 0, 6, 1, 0 ]);
    assert!(matches!(Program::from_bytes(&bytes), Err(LoadError::Truncated)));
}

#[test]
fn invalid_operand_tag() {
    let mut bytes = header(1, 1, 1);
    bytes.extend_from_slice(&[ OpCode::NOP as u8, 0, 9 ]);
    assert!(matches!(Program::from_bytes(&bytes), Err(LoadError::InvalidOperandTag(9))));
}

#[test]
fn string_operands() {
    let mut bytes = header(1, 1, 1);
    bytes.extend_from_slice(&[ OpCode::NOP as u8, 0, 8, 2, 0, b'h', b'i' ]);
    let program = Program::from_bytes(&bytes).unwrap();
    assert_eq!(program.instructions()[0].operand, Operand::Str("hi".to_string()));

    let mut bytes = header(1, 1, 1);
    bytes.extend_from_slice(&[ OpCode::NOP as u8, 0, 8, 2, 0, 0xff, 0xfe ]);
    assert!(matches!(Program::from_bytes(&bytes), Err(LoadError::InvalidString)));
}

#[test]
fn trailing_bytes_are_ignored() {
    let program = assemble("ldi 1\nhalt").unwrap();
    let mut bytes = program.to_bytes();
    bytes.extend_from_slice(b"trailing");
    assert_eq!(Program::from_bytes(&bytes).unwrap(), program);
}

#[test]
fn load_errors_leave_registry_unchanged() {
    let engine = Engine::default();
    let mut registry = ProgramRegistry::new();
    load(&engine, &mut registry, "good", "halt");
    assert!(engine.load_bytes(&mut registry, "bad", &header(1, 0, 0)).is_err());
    assert_eq!(registry.len(), 1);
    assert!(registry.find("bad").is_none());
}
