//! A loaded program instance: registers, memory and execution state.

use tracing::{debug, warn};
use crate::prelude::*;
use crate::config::{Cell, InstructionIndex, MAX_PROGRAM_NAME_LEN, MEMORY_SIZE, NUM_GENERAL_REGISTERS, NUM_REGISTERS, REG_COND, REG_PC};
use crate::shared::{bounded::BoundedString, typed_ids::ProgramId};
use crate::bytecode::{Instruction, Operand, cond};
use crate::bytecode::runtime::error::{RuntimeError, RuntimeErrorKind, RuntimeResult};

/// Current state of a program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgramState {
    /// The program was loaded (or reset) and has not been started.
    Loaded,
    /// The program executes instructions on each tick.
    Running,
    /// The program is paused. It can be resumed.
    Frozen,
    /// The program has finished and must be reset before it can be run again.
    Halted,
}

/// Control flow resulting from a single instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Next,
    Jump(InstructionIndex),
    Halt,
}

/// A program instance owned by a [ProgramRegistry](crate::runtime::ProgramRegistry).
#[derive(Clone)]
pub struct VMProgram {
    id                      : ProgramId,
    name                    : BoundedString<MAX_PROGRAM_NAME_LEN>,
    pub(crate) registers    : [ Cell; NUM_REGISTERS ],
    memory                  : Box<[ Cell ]>,
    instructions            : Vec<Instruction>,
    pub(crate) call_stack   : Vec<InstructionIndex>,
    /// Maximum depth of `call_stack`.
    pub(crate) call_limit   : usize,
    tick_count              : u64,
    state                   : ProgramState,
}

/// Public program methods.
impl VMProgram {
    pub(crate) fn new(id: ProgramId, name: BoundedString<MAX_PROGRAM_NAME_LEN>, instructions: Vec<Instruction>, call_limit: usize) -> Self {
        VMProgram {
            id          : id,
            name        : name,
            registers   : [ 0; NUM_REGISTERS ],
            memory      : vec![ 0; MEMORY_SIZE ].into_boxed_slice(),
            instructions: instructions,
            call_stack  : Vec::new(),
            call_limit  : call_limit,
            tick_count  : 0,
            state       : ProgramState::Loaded,
        }
    }
    pub fn id(self: &Self) -> ProgramId {
        self.id
    }
    pub fn name(self: &Self) -> &str {
        self.name.as_str()
    }
    pub fn state(self: &Self) -> ProgramState {
        self.state
    }
    pub fn is_running(self: &Self) -> bool {
        self.state == ProgramState::Running
    }
    pub fn instructions(self: &Self) -> &[ Instruction ] {
        &self.instructions
    }
    /// Index of the next instruction to execute.
    pub fn program_counter(self: &Self) -> InstructionIndex {
        self.registers[REG_PC] as InstructionIndex
    }
    /// Current condition flags.
    pub fn cond(self: &Self) -> u8 {
        self.registers[REG_COND] as u8
    }
    /// Number of ticks in which the program executed.
    pub fn tick_count(self: &Self) -> u64 {
        self.tick_count
    }
    /// Current call depth.
    pub fn call_depth(self: &Self) -> usize {
        self.call_stack.len()
    }
    /// All registers: r0 to r7 followed by PC and COND.
    pub fn registers(self: &Self) -> &[ Cell; NUM_REGISTERS ] {
        &self.registers
    }
    /// Returns a general purpose register.
    pub fn register(self: &Self, index: usize) -> RuntimeResult<Cell> {
        Self::check_register(index).map(|index| self.registers[index]).map_err(|kind| self.error(kind))
    }
    /// Returns the low 32 bit of a general purpose register as an integer.
    pub fn register_i32(self: &Self, index: usize) -> RuntimeResult<i32> {
        Ok(self.register(index)? as u32 as i32)
    }
    /// Returns the low 32 bit of a general purpose register as a float.
    pub fn register_f32(self: &Self, index: usize) -> RuntimeResult<f32> {
        Ok(f32::from_bits(self.register(index)? as u32))
    }
    /// Reads a memory cell.
    pub fn read_memory(self: &Self, address: usize) -> RuntimeResult<Cell> {
        self.read_cell(address).map_err(|kind| self.error(kind))
    }
    /// Writes a memory cell.
    pub fn write_memory(self: &mut Self, address: usize, value: Cell) -> RuntimeResult {
        self.write_cell(address, value).map_err(|kind| self.error(kind))
    }
}

impl VMProgram {

    /// Clears registers, memory, call stack and tick count, keeping only code.
    pub(crate) fn reset(self: &mut Self) {
        self.registers = [ 0; NUM_REGISTERS ];
        self.memory.iter_mut().for_each(|cell| *cell = 0);
        self.call_stack.clear();
        self.tick_count = 0;
        self.state = ProgramState::Loaded;
    }

    pub(crate) fn set_state(self: &mut Self, state: ProgramState) {
        debug!("program '{}' {:?} -> {:?}", self.name, self.state, state);
        self.state = state;
    }

    pub(crate) fn count_tick(self: &mut Self) {
        self.tick_count += 1;
    }

    /// Creates a runtime error at the current instruction.
    pub(crate) fn error(self: &Self, kind: RuntimeErrorKind) -> RuntimeError {
        RuntimeError::new(kind, self.name.as_str(), self.program_counter())
    }

    /// Executes the instruction at the program counter. A jump, call or return leading outside the program raises
    /// `Overrun` at the transferring instruction, so the counter stays in range while running.
    pub(crate) fn step(self: &mut Self) -> RuntimeResult {
        let pc = self.program_counter();
        let instruction = match self.instructions.get(pc as usize) {
            Some(instruction) => instruction.clone(),
            None => return Err(self.error(RuntimeErrorKind::Overrun)),
        };
        let flow = self.exec(&instruction).map_err(|kind| self.error(kind))?;
        match flow {
            Flow::Next => self.registers[REG_PC] = pc as Cell + 1,
            Flow::Jump(target) if target as usize >= self.instructions.len() => return Err(self.error(RuntimeErrorKind::Overrun)),
            Flow::Jump(target) => self.registers[REG_PC] = target as Cell,
            Flow::Halt => self.set_state(ProgramState::Halted),
        }
        Ok(())
    }

    /// Executes a single instruction unless its condition flags do not match.
    fn exec(self: &mut Self, instruction: &Instruction) -> Result<Flow, RuntimeErrorKind> {
        if instruction.flags != 0 && instruction.flags & self.cond() == 0 {
            return Ok(Flow::Next);
        }
        match instruction.opcode() {
            Some(opcode) => self.dispatch(opcode, &instruction.operand),
            None => {
                warn!("program '{}' at instruction {}: invalid opcode {:#04x} ignored", self.name, self.program_counter(), instruction.opcode);
                Ok(Flow::Next)
            }
        }
    }

    // instruction helpers

    fn check_register(index: usize) -> Result<usize, RuntimeErrorKind> {
        if index < NUM_GENERAL_REGISTERS {
            Ok(index)
        } else {
            Err(RuntimeErrorKind::InvalidRegister(index))
        }
    }

    /// Returns the register index given by the operand, or the default if the operand is omitted.
    pub(crate) fn register_operand(operand: &Operand, default: Option<usize>) -> Result<usize, RuntimeErrorKind> {
        match (operand, default) {
            (Operand::U8(index), _) => Self::check_register(*index as usize),
            (Operand::None, Some(default)) => Ok(default),
            _ => Err(RuntimeErrorKind::InvalidOperand),
        }
    }

    pub(crate) fn set_cond(self: &mut Self, flags: u8) {
        self.registers[REG_COND] = (flags & cond::ALL) as Cell;
    }

    /// Writes a raw value to a register and updates the condition flags from its low 32 bit.
    pub(crate) fn set_register(self: &mut Self, index: usize, value: Cell) {
        self.registers[index] = value;
        self.set_cond(cond::of_i32(value as u32 as i32));
    }

    pub(crate) fn i32_at(self: &Self, index: usize) -> i32 {
        self.registers[index] as u32 as i32
    }

    pub(crate) fn set_i32(self: &mut Self, index: usize, value: i32) {
        self.registers[index] = value as u32 as Cell;
        self.set_cond(cond::of_i32(value));
    }

    pub(crate) fn f32_at(self: &Self, index: usize) -> f32 {
        f32::from_bits(self.registers[index] as u32)
    }

    pub(crate) fn set_f32(self: &mut Self, index: usize, value: f32) {
        self.registers[index] = value.to_bits() as Cell;
        self.set_cond(cond::of_f32(value));
    }

    /// `r0 = op(r0, rN)` with `N` defaulting to 1.
    pub(crate) fn binary_i32(self: &mut Self, operand: &Operand, op: impl Fn(i32, i32) -> i32) -> Result<Flow, RuntimeErrorKind> {
        let other = Self::register_operand(operand, Some(1))?;
        self.set_i32(0, op(self.i32_at(0), self.i32_at(other)));
        Ok(Flow::Next)
    }

    /// `rN = op(rN)` with `N` defaulting to 0.
    pub(crate) fn unary_i32(self: &mut Self, operand: &Operand, op: impl Fn(i32) -> i32) -> Result<Flow, RuntimeErrorKind> {
        let target = Self::register_operand(operand, Some(0))?;
        self.set_i32(target, op(self.i32_at(target)));
        Ok(Flow::Next)
    }

    /// `r0 = op(r0, rN)` with `N` defaulting to 1.
    pub(crate) fn binary_f32(self: &mut Self, operand: &Operand, op: impl Fn(f32, f32) -> f32) -> Result<Flow, RuntimeErrorKind> {
        let other = Self::register_operand(operand, Some(1))?;
        self.set_f32(0, op(self.f32_at(0), self.f32_at(other)));
        Ok(Flow::Next)
    }

    /// `rN = op(rN)` with `N` defaulting to 0.
    pub(crate) fn unary_f32(self: &mut Self, operand: &Operand, op: impl Fn(f32) -> f32) -> Result<Flow, RuntimeErrorKind> {
        let target = Self::register_operand(operand, Some(0))?;
        self.set_f32(target, op(self.f32_at(target)));
        Ok(Flow::Next)
    }

    pub(crate) fn read_cell(self: &Self, address: usize) -> Result<Cell, RuntimeErrorKind> {
        self.memory.get(address).copied().ok_or(RuntimeErrorKind::MemoryOutOfBounds(address))
    }

    pub(crate) fn write_cell(self: &mut Self, address: usize, value: Cell) -> Result<(), RuntimeErrorKind> {
        match self.memory.get_mut(address) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(RuntimeErrorKind::MemoryOutOfBounds(address)),
        }
    }
}

impl Debug for VMProgram {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VMProgram")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("registers", &self.registers)
            .field("call_stack", &self.call_stack)
            .field("tick_count", &self.tick_count)
            .field("instructions", &self.instructions.len())
            .finish()
    }
}
