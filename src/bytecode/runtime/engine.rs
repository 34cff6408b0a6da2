//! Program loading, lifecycle transitions and tick based scheduling.

use std::path::Path;
use tracing::{debug, error, info};
use crate::config::MAX_PROGRAM_NAME_LEN;
use crate::shared::{bounded::BoundedString, typed_ids::ProgramId};
use crate::bytecode::{Instruction, Program, error::{LoadError, LoadResult}};
use crate::bytecode::runtime::{registry::ProgramRegistry, vm::{ProgramState, VMProgram}, error::{RuntimeError, RuntimeErrorKind, RuntimeResult}};

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of instructions each running program executes per tick.
    pub instructions_per_tick   : u32,
    /// Maximum call depth of a program.
    pub max_call_depth          : usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            instructions_per_tick   : 1,
            max_call_depth          : 256,
        }
    }
}

/// Loads programs into a [ProgramRegistry] and drives their execution.
///
/// ```
/// use yang::{assembler::assemble, runtime::{Engine, ProgramRegistry, ProgramState}};
///
/// let engine = Engine::default();
/// let mut registry = ProgramRegistry::new();
/// let image = assemble("ldi 3\nhalt").unwrap().to_bytes();
/// let id = engine.load_bytes(&mut registry, "demo", &image).unwrap();
/// engine.execute(&mut registry, id).unwrap();
/// while registry.get(id).unwrap().is_running() {
///     assert!(engine.tick(&mut registry).is_empty());
/// }
/// assert_eq!(registry.get(id).unwrap().state(), ProgramState::Halted);
/// assert_eq!(registry.get(id).unwrap().register_i32(0).unwrap(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Engine { config }
    }

    pub fn config(self: &Self) -> &EngineConfig {
        &self.config
    }

    /// Reads an executable file and registers it in state `Loaded`. The program is named after the file stem.
    pub fn load(self: &Self, registry: &mut ProgramRegistry, path: impl AsRef<Path>) -> LoadResult<ProgramId> {
        let path = path.as_ref();
        let name = path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        self.load_bytes(registry, &name, &bytes)
    }

    /// Decodes an in-memory executable and registers it in state `Loaded`.
    pub fn load_bytes(self: &Self, registry: &mut ProgramRegistry, name: &str, bytes: &[ u8 ]) -> LoadResult<ProgramId> {
        let name = BoundedString::new(name).map_err(LoadError::InvalidName)?;
        let program = Program::from_bytes(bytes).map_err(|err| {
            error!("failed to load program '{}': {}", name, err);
            err
        })?;
        self.register(registry, name, program.instructions)
    }

    /// Registers an already decoded image in state `Loaded`.
    pub fn load_program(self: &Self, registry: &mut ProgramRegistry, name: &str, program: &Program) -> LoadResult<ProgramId> {
        let name = BoundedString::new(name).map_err(LoadError::InvalidName)?;
        self.register(registry, name, program.instructions.clone())
    }

    fn register(self: &Self, registry: &mut ProgramRegistry, name: BoundedString<MAX_PROGRAM_NAME_LEN>, instructions: Vec<Instruction>) -> LoadResult<ProgramId> {
        let num_instructions = instructions.len();
        let display_name = name.to_string();
        let id = registry.register(name, instructions, self.config.max_call_depth).ok_or(LoadError::RegistryFull)?;
        info!("loaded program '{}' {} with {} instructions", display_name, id, num_instructions);
        Ok(id)
    }

    /// Starts a loaded program or resumes a frozen one.
    pub fn execute(self: &Self, registry: &mut ProgramRegistry, id: ProgramId) -> RuntimeResult {
        let program = Self::program_mut(registry, id)?;
        match program.state() {
            ProgramState::Loaded | ProgramState::Frozen if program.instructions().is_empty() => Err(program.error(RuntimeErrorKind::EmptyProgram)),
            ProgramState::Loaded | ProgramState::Frozen => {
                program.set_state(ProgramState::Running);
                Ok(())
            }
            ProgramState::Running | ProgramState::Halted => Err(program.error(RuntimeErrorKind::NotReady)),
        }
    }

    /// Pauses a running program, preserving its state.
    pub fn freeze(self: &Self, registry: &mut ProgramRegistry, id: ProgramId) -> RuntimeResult {
        let program = Self::program_mut(registry, id)?;
        match program.state() {
            ProgramState::Running => {
                program.set_state(ProgramState::Frozen);
                Ok(())
            }
            _ => Err(program.error(RuntimeErrorKind::NotReady)),
        }
    }

    /// Pauses the first program with the given name.
    pub fn freeze_named(self: &Self, registry: &mut ProgramRegistry, name: &str) -> RuntimeResult {
        let id = Self::find(registry, name)?;
        self.freeze(registry, id)
    }

    /// Removes a program from the registry, releasing its buffers.
    pub fn terminate(self: &Self, registry: &mut ProgramRegistry, id: ProgramId) -> RuntimeResult {
        match registry.remove(id) {
            Some(program) => {
                info!("terminated program '{}' {} after {} ticks", program.name(), id, program.tick_count());
                Ok(())
            }
            None => Err(RuntimeError::new(RuntimeErrorKind::UnknownProgram, &id.to_string(), 0)),
        }
    }

    /// Removes the first program with the given name from the registry.
    pub fn terminate_named(self: &Self, registry: &mut ProgramRegistry, name: &str) -> RuntimeResult {
        let id = Self::find(registry, name)?;
        self.terminate(registry, id)
    }

    /// Clears registers, memory, call stack and tick count and returns the program to state `Loaded`.
    pub fn reset(self: &Self, registry: &mut ProgramRegistry, id: ProgramId) -> RuntimeResult {
        let program = Self::program_mut(registry, id)?;
        program.reset();
        debug!("reset program '{}'", program.name());
        Ok(())
    }

    /// Advances every running program by up to `instructions_per_tick` instructions, in registration order.
    /// Programs raising a runtime error are removed from the registry; their errors are returned.
    pub fn tick(self: &Self, registry: &mut ProgramRegistry) -> Vec<RuntimeError> {
        let budget = self.config.instructions_per_tick.max(1);
        let mut errors = Vec::new();
        let mut faulted = Vec::new();
        for program in registry.iter_mut().filter(|program| program.is_running()) {
            program.count_tick();
            for _ in 0..budget {
                if let Err(err) = program.step() {
                    error!("{}", err);
                    faulted.push(program.id());
                    errors.push(err);
                    break;
                }
                if !program.is_running() {
                    break;
                }
            }
        }
        for id in faulted {
            registry.remove(id);
        }
        errors
    }

    fn find(registry: &ProgramRegistry, name: &str) -> RuntimeResult<ProgramId> {
        registry.find(name).ok_or_else(|| RuntimeError::new(RuntimeErrorKind::UnknownProgram, name, 0))
    }

    fn program_mut(registry: &mut ProgramRegistry, id: ProgramId) -> RuntimeResult<&mut VMProgram> {
        registry.get_mut(id).ok_or_else(|| RuntimeError::new(RuntimeErrorKind::UnknownProgram, &id.to_string(), 0))
    }
}
