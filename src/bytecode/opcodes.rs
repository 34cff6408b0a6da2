//! Opcode definitions. Implemented on VMProgram.
//!
//! Binary arithmetic computes `r0 = r0 <op> rN` where `N` defaults to 1. Unary arithmetic updates `rN` in place
//! where `N` defaults to 0. Every value written to a register sets the condition register.

#[macro_use]
mod macros;

#[cfg(feature="runtime")]
use crate::bytecode::runtime::{vm::Flow, error::RuntimeErrorKind};
#[cfg(feature="runtime")]
use std::cmp::Ordering;

impl_opcodes!{

    /// Does nothing.
    fn NOP = 0 as "nop" (self: &mut Self, _operand: None) {
        Ok(Flow::Next)
    }

    /// Returns from the current call. Halts the program if there is no call to return from.
    fn RETURN = 1 as "return" (self: &mut Self, _operand: None) {
        Ok(match self.call_stack.pop() {
            Some(return_to) => Flow::Jump(return_to),
            None => Flow::Halt,
        })
    }

    /// Halts the program.
    fn HALT = 2 as "halt" (self: &mut Self, _operand: None) {
        Ok(Flow::Halt)
    }

    /// Pushes the index of the next instruction onto the call stack and jumps to the target instruction.
    fn CALL = 3 as "call" (self: &mut Self, operand: Target) {
        let target = operand.as_u32().ok_or(RuntimeErrorKind::InvalidOperand)?;
        if self.call_stack.len() >= self.call_limit {
            return Err(RuntimeErrorKind::CallStackOverflow);
        }
        self.call_stack.push(self.program_counter() + 1);
        Ok(Flow::Jump(target))
    }

    /// Jumps to the target instruction.
    fn JUMP = 4 as "jmp" (self: &mut Self, operand: Target) {
        let target = operand.as_u32().ok_or(RuntimeErrorKind::InvalidOperand)?;
        Ok(Flow::Jump(target))
    }

    /// Sets condition bits: `cond = cond | mask`.
    fn OR = 5 as "or" (self: &mut Self, operand: Mask) {
        let mask = operand.as_u8().ok_or(RuntimeErrorKind::InvalidOperand)?;
        self.set_cond(self.cond() | mask);
        Ok(Flow::Next)
    }

    /// Clears condition bits: `cond = cond & mask`.
    fn AND = 6 as "and" (self: &mut Self, operand: Mask) {
        let mask = operand.as_u8().ok_or(RuntimeErrorKind::InvalidOperand)?;
        self.set_cond(self.cond() & mask);
        Ok(Flow::Next)
    }

    /// Loads a 32 bit integer immediate into r0.
    fn LOAD_I32 = 7 as "ldi" (self: &mut Self, operand: Immediate) {
        let value = operand.as_i32().ok_or(RuntimeErrorKind::InvalidOperand)?;
        self.set_i32(0, value);
        Ok(Flow::Next)
    }

    /// Loads a 32 bit float immediate into r0.
    fn LOAD_F32 = 8 as "ldf" (self: &mut Self, operand: Float) {
        let value = operand.as_f32().ok_or(RuntimeErrorKind::InvalidOperand)?;
        self.set_f32(0, value);
        Ok(Flow::Next)
    }

    /// Copies the given register into r0.
    fn GET = 9 as "get" (self: &mut Self, operand: Register) {
        let source = Self::register_operand(operand, None)?;
        self.set_register(0, self.registers[source]);
        Ok(Flow::Next)
    }

    /// Copies r0 into the given register.
    fn PUT = 10 as "put" (self: &mut Self, operand: Register) {
        let target = Self::register_operand(operand, None)?;
        self.set_register(target, self.registers[0]);
        Ok(Flow::Next)
    }

    /// Loads the memory cell at the given address into r0.
    fn LOAD = 11 as "load" (self: &mut Self, operand: Address) {
        let address = operand.as_u16().ok_or(RuntimeErrorKind::InvalidOperand)?;
        let value = self.read_cell(address as usize)?;
        self.set_register(0, value);
        Ok(Flow::Next)
    }

    /// Stores r0 into the memory cell at the given address.
    fn STORE = 12 as "store" (self: &mut Self, operand: Address) {
        let address = operand.as_u16().ok_or(RuntimeErrorKind::InvalidOperand)?;
        self.write_cell(address as usize, self.registers[0])?;
        Ok(Flow::Next)
    }

    fn MUL_I32 = 13 as "muli" (self: &mut Self, operand: OptRegister) {
        self.binary_i32(operand, i32::wrapping_mul)
    }

    /// Increments the given register (default r0).
    fn INC_I32 = 14 as "inci" (self: &mut Self, operand: OptRegister) {
        self.unary_i32(operand, |value| value.wrapping_add(1))
    }

    fn ADD_I32 = 15 as "addi" (self: &mut Self, operand: OptRegister) {
        self.binary_i32(operand, i32::wrapping_add)
    }

    fn SUB_I32 = 16 as "subi" (self: &mut Self, operand: OptRegister) {
        self.binary_i32(operand, i32::wrapping_sub)
    }

    /// Negates the given register (default r0).
    fn NEG_I32 = 17 as "negi" (self: &mut Self, operand: OptRegister) {
        self.unary_i32(operand, i32::wrapping_neg)
    }

    /// Compares r0 with the given register (default r1) and sets the condition register. Registers are unchanged.
    fn CMP_I32 = 18 as "cmpi" (self: &mut Self, operand: OptRegister) {
        let other = Self::register_operand(operand, Some(1))?;
        let ordering: Option<Ordering> = Some(self.i32_at(0).cmp(&self.i32_at(other)));
        self.set_cond(crate::bytecode::cond::of_ordering(ordering));
        Ok(Flow::Next)
    }

    fn MUL_F32 = 19 as "mulf" (self: &mut Self, operand: OptRegister) {
        self.binary_f32(operand, |a, b| a * b)
    }

    /// Adds 1.0 to the given register (default r0).
    fn INC_F32 = 20 as "incf" (self: &mut Self, operand: OptRegister) {
        self.unary_f32(operand, |value| value + 1.0)
    }

    fn ADD_F32 = 21 as "addf" (self: &mut Self, operand: OptRegister) {
        self.binary_f32(operand, |a, b| a + b)
    }

    fn SUB_F32 = 22 as "subf" (self: &mut Self, operand: OptRegister) {
        self.binary_f32(operand, |a, b| a - b)
    }

    fn NEG_F32 = 23 as "negf" (self: &mut Self, operand: OptRegister) {
        self.unary_f32(operand, |value| -value)
    }

    /// Compares r0 with the given register (default r1). Unordered (NaN) operands clear all condition bits.
    fn CMP_F32 = 24 as "cmpf" (self: &mut Self, operand: OptRegister) {
        let other = Self::register_operand(operand, Some(1))?;
        let ordering = self.f32_at(0).partial_cmp(&self.f32_at(other));
        self.set_cond(crate::bytecode::cond::of_ordering(ordering));
        Ok(Flow::Next)
    }
}
