//! Two pass assembler translating mnemonic text into executable images.
//!
//! ```text
//! ; comment
//! loop:               ; label, refers to the next instruction
//!     ldi 10
//!     subi r1
//!     jmp.p loop      ; condition suffix: any combination of p, z and n
//!     halt
//! ```

pub mod error;

use std::collections::HashMap;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while, take_while1};
use nom::character::complete::{alphanumeric0, char, hex_digit1, one_of, space0, space1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, rest};
use nom::number::complete::float;
use nom::sequence::{pair, preceded, terminated, tuple};
use tracing::{debug, warn};
use crate::config::NUM_GENERAL_REGISTERS;
use crate::bytecode::{Instruction, Operand, OperandKind, OpCode, Program, cond};
use error::{AssembleError, AssembleErrorKind, AssembleResult};

type Output<'a, O> = IResult<&'a str, O>;

// labels and mnemonics

fn identifier(i: &str) -> Output<&str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(i)
}

fn label(i: &str) -> Output<&str> {
    terminated(identifier, pair(space0, char(':')))(i)
}

/// `mnemonic[.cond] [operand]`
fn instruction(i: &str) -> Output<(&str, Option<&str>, Option<&str>)> {
    tuple((
        identifier,
        opt(preceded(char('.'), alphanumeric0)),
        opt(preceded(space1, rest)),
    ))(i)
}

// operands

fn integer(i: &str) -> Output<i64> {
    alt((
        map_res(preceded(tag_no_case("0x"), hex_digit1), |hex: &str| i64::from_str_radix(hex, 16)),
        nom::character::complete::i64,
    ))(i)
}

fn register(i: &str) -> Output<u8> {
    preceded(opt(one_of("rR")), nom::character::complete::u8)(i)
}

fn mask(i: &str) -> Output<Option<u8>> {
    alt((
        map(integer, |value| u8::try_from(value).ok().filter(|&value| (value & !cond::ALL) == 0)),
        map(alphanumeric0, cond::from_letters),
    ))(i)
}

fn complete<'a, O>(parser: impl FnMut(&'a str) -> Output<'a, O>, text: &'a str) -> Option<O> {
    all_consuming(parser)(text).ok().map(|(_, output)| output)
}

/// A classified source line.
enum Line<'a> {
    Label(&'a str),
    Instruction { mnemonic: &'a str, condition: Option<&'a str>, operand: Option<&'a str> },
}

/// Classifies a line with comment and surrounding whitespace already removed.
fn classify(text: &str) -> Result<Line<'_>, AssembleErrorKind> {
    if let Some(name) = text.strip_suffix(':') {
        complete(label, text)
            .map(Line::Label)
            .ok_or_else(|| AssembleErrorKind::InvalidLabel(name.trim().to_string()))
    } else {
        complete(instruction, text)
            .map(|(mnemonic, condition, operand)| Line::Instruction { mnemonic, condition, operand: operand.map(str::trim) })
            .ok_or_else(|| AssembleErrorKind::Syntax(text.to_string()))
    }
}

/// Parses operand text according to the operand kind of the opcode.
fn operand(opcode: OpCode, text: Option<&str>, labels: &HashMap<&str, u32>) -> Result<Operand, AssembleErrorKind> {
    let kind = opcode.operand_kind();
    let text = match (kind, text) {
        (OperandKind::None, None) | (OperandKind::OptRegister, None) => return Ok(Operand::None),
        (OperandKind::None, Some(text)) => return Err(AssembleErrorKind::UnexpectedOperand(text.to_string())),
        (_, None) => return Err(AssembleErrorKind::MissingOperand(opcode.mnemonic())),
        (_, Some(text)) => text,
    };
    let invalid = || AssembleErrorKind::InvalidOperand(text.to_string());
    match kind {
        OperandKind::None => Ok(Operand::None),
        OperandKind::Register | OperandKind::OptRegister => complete(register, text)
            .filter(|&index| (index as usize) < NUM_GENERAL_REGISTERS)
            .map(Operand::U8)
            .ok_or_else(invalid),
        OperandKind::Immediate => complete(integer, text)
            .and_then(|value| i32::try_from(value).ok())
            .map(Operand::I32)
            .ok_or_else(invalid),
        OperandKind::Float => complete(float, text)
            .map(Operand::F32)
            .ok_or_else(invalid),
        OperandKind::Address => complete(integer, text)
            .and_then(|value| u16::try_from(value).ok())
            .map(Operand::U16)
            .ok_or_else(invalid),
        OperandKind::Mask => complete(mask, text)
            .flatten()
            .map(Operand::U8)
            .ok_or_else(invalid),
        OperandKind::Target => {
            if let Some(name) = complete(identifier, text) {
                labels.get(name).map(|&index| Operand::U32(index)).ok_or_else(|| AssembleErrorKind::UndefinedLabel(name.to_string()))
            } else {
                complete(integer, text)
                    .and_then(|value| u32::try_from(value).ok())
                    .map(Operand::U32)
                    .ok_or_else(invalid)
            }
        }
    }
}

/// Assembles mnemonic source text into a version 1 executable image with a single entry section.
///
/// Unknown mnemonics are replaced by `nop` and logged as warnings.
///
/// ```
/// use yang::{assembler::assemble, executable::OpCode};
///
/// let program = assemble("addi\nnop\n").unwrap();
/// let opcodes: Vec<_> = program.instructions().iter().map(|i| i.opcode().unwrap()).collect();
/// assert_eq!(opcodes, [ OpCode::ADD_I32, OpCode::NOP ]);
/// ```
pub fn assemble(source: &str) -> AssembleResult<Program> {

    // first pass: classify lines, record label positions

    let mut lines = Vec::new();
    let mut labels: HashMap<&str, u32> = HashMap::new();
    let mut num_instructions: u32 = 0;

    for (index, raw) in source.lines().enumerate() {
        let line_number = index as u32 + 1;
        let text = raw.split(';').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        match classify(text).map_err(|kind| AssembleError::new(kind, line_number))? {
            Line::Label(name) => {
                if labels.insert(name, num_instructions).is_some() {
                    return Err(AssembleError::new(AssembleErrorKind::DuplicateLabel(name.to_string()), line_number));
                }
            }
            line @ Line::Instruction { .. } => {
                num_instructions = num_instructions.checked_add(1)
                    .ok_or_else(|| AssembleError::new(AssembleErrorKind::TooManyInstructions, line_number))?;
                lines.push((line_number, line));
            }
        }
    }

    debug!("assembler labels: {:?}", labels);

    // second pass: encode instructions, resolve labels

    let mut instructions = Vec::with_capacity(lines.len());

    for (line_number, line) in lines {
        if let Line::Instruction { mnemonic, condition, operand: operand_text } = line {
            let instruction = match OpCode::from_mnemonic(mnemonic) {
                Some(opcode) => {
                    let flags = match condition {
                        Some(letters) => cond::from_letters(letters)
                            .ok_or_else(|| AssembleError::new(AssembleErrorKind::InvalidCondition(letters.to_string()), line_number))?,
                        None => 0,
                    };
                    let operand = operand(opcode, operand_text, &labels).map_err(|kind| AssembleError::new(kind, line_number))?;
                    Instruction::new(opcode, operand).with_flags(flags)
                }
                None => {
                    warn!("line {}: unknown mnemonic '{}', emitting nop", line_number, mnemonic);
                    Instruction::new(OpCode::NOP, Operand::None)
                }
            };
            instructions.push(instruction);
        }
    }

    debug!("assembled {} instructions", instructions.len());
    Ok(Program::new(instructions))
}
