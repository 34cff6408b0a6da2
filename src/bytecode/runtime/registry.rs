//! Owned collection of loaded programs.

use crate::config::MAX_PROGRAM_NAME_LEN;
use crate::shared::{bounded::BoundedString, typed_ids::ProgramId};
use crate::bytecode::Instruction;
use crate::bytecode::runtime::vm::VMProgram;

/// Owns all loaded programs in registration order. Programs are created by the
/// [Engine](crate::runtime::Engine) and removed on termination or runtime error.
#[derive(Debug, Default)]
pub struct ProgramRegistry {
    programs    : Vec<VMProgram>,
    next_id     : usize,
}

impl ProgramRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates a program instance and returns its id. `None` if ids are exhausted.
    pub(crate) fn register(self: &mut Self, name: BoundedString<MAX_PROGRAM_NAME_LEN>, instructions: Vec<Instruction>, call_limit: usize) -> Option<ProgramId> {
        let id = ProgramId::try_from(self.next_id).ok()?;
        self.next_id += 1;
        self.programs.push(VMProgram::new(id, name, instructions, call_limit));
        Some(id)
    }
    /// Removes a program, releasing its buffers.
    pub(crate) fn remove(self: &mut Self, id: ProgramId) -> Option<VMProgram> {
        let index = self.programs.iter().position(|program| program.id() == id)?;
        Some(self.programs.remove(index))
    }
    pub fn get(self: &Self, id: ProgramId) -> Option<&VMProgram> {
        self.programs.iter().find(|program| program.id() == id)
    }
    pub fn get_mut(self: &mut Self, id: ProgramId) -> Option<&mut VMProgram> {
        self.programs.iter_mut().find(|program| program.id() == id)
    }
    /// Returns the first registered program with the given name.
    pub fn get_by_name(self: &Self, name: &str) -> Option<&VMProgram> {
        self.programs.iter().find(|program| program.name() == name)
    }
    /// Returns the id of the first registered program with the given name.
    pub fn find(self: &Self, name: &str) -> Option<ProgramId> {
        self.get_by_name(name).map(|program| program.id())
    }
    /// Iterates over programs in registration order.
    pub fn iter(self: &Self) -> impl Iterator<Item = &VMProgram> {
        self.programs.iter()
    }
    pub(crate) fn iter_mut(self: &mut Self) -> impl Iterator<Item = &mut VMProgram> {
        self.programs.iter_mut()
    }
    pub fn len(self: &Self) -> usize {
        self.programs.len()
    }
    pub fn is_empty(self: &Self) -> bool {
        self.programs.is_empty()
    }
}
