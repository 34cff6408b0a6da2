//! Instruction model and its binary encoding.

use crate::prelude::*;
use crate::bytecode::opcodes::OpCode;
use crate::bytecode::error::{LoadError, LoadResult};

/// Condition flag bits, held in the COND register and used as instruction predicates.
pub mod cond {
    use std::cmp::Ordering;

    pub const POS: u8 = 0b001;
    pub const ZRO: u8 = 0b010;
    pub const NEG: u8 = 0b100;
    /// All valid condition bits.
    pub const ALL: u8 = POS | ZRO | NEG;

    /// Condition flags describing an ordering (`Greater` is positive).
    pub fn of_ordering(ordering: Option<Ordering>) -> u8 {
        match ordering {
            Some(Ordering::Greater) => POS,
            Some(Ordering::Equal) => ZRO,
            Some(Ordering::Less) => NEG,
            None => 0,
        }
    }

    pub fn of_i32(value: i32) -> u8 {
        of_ordering(Some(value.cmp(&0)))
    }

    /// Condition flags of a float. NaN sets no flags.
    pub fn of_f32(value: f32) -> u8 {
        of_ordering(value.partial_cmp(&0.0))
    }

    /// Parses a combination of the letters `p`, `z` and `n` (case-insensitive).
    pub fn from_letters(letters: &str) -> Option<u8> {
        if letters.is_empty() {
            return None;
        }
        let mut flags = 0;
        for c in letters.chars() {
            flags |= match c.to_ascii_lowercase() {
                'p' => POS,
                'z' => ZRO,
                'n' => NEG,
                _ => return None,
            };
        }
        Some(flags)
    }

    /// Formats flags as letters, e.g. `zn`.
    pub fn to_letters(flags: u8) -> String {
        let mut result = String::new();
        if flags & POS != 0 { result.push('p'); }
        if flags & ZRO != 0 { result.push('z'); }
        if flags & NEG != 0 { result.push('n'); }
        result
    }
}

/// Operand expected by an opcode. Used by the assembler to parse operand text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandKind {
    /// No operand.
    None,
    /// Instruction index (u32) or label.
    Target,
    /// Condition bit mask (u8).
    Mask,
    /// 32 bit signed immediate.
    Immediate,
    /// 32 bit float immediate.
    Float,
    /// Memory cell address (u16).
    Address,
    /// General purpose register (u8).
    Register,
    /// General purpose register (u8), may be omitted.
    OptRegister,
}

/// Instruction operand.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    None,
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    F32(f32),
    Str(String),
}

impl Operand {
    pub fn as_u8(self: &Self) -> Option<u8> {
        match self { Operand::U8(v) => Some(*v), _ => None }
    }
    pub fn as_u16(self: &Self) -> Option<u16> {
        match self { Operand::U16(v) => Some(*v), _ => None }
    }
    pub fn as_u32(self: &Self) -> Option<u32> {
        match self { Operand::U32(v) => Some(*v), _ => None }
    }
    pub fn as_i32(self: &Self) -> Option<i32> {
        match self { Operand::I32(v) => Some(*v), _ => None }
    }
    pub fn as_f32(self: &Self) -> Option<f32> {
        match self { Operand::F32(v) => Some(*v), _ => None }
    }
    pub fn is_none(self: &Self) -> bool {
        *self == Operand::None
    }
}

/// Consumes bytes from the front of a slice and returns them.
pub(crate) fn read<'a>(slice: &mut &'a [ u8 ], num_bytes: usize) -> LoadResult<&'a [ u8 ]> {
    if slice.len() < num_bytes {
        Err(LoadError::Truncated)
    } else {
        let result = &slice[0..num_bytes];
        *slice = &slice[num_bytes..];
        Ok(result)
    }
}

/// Consumes a fixed number of bytes from the front of a slice.
pub(crate) fn read_array<const N: usize>(slice: &mut &[ u8 ]) -> LoadResult<[ u8; N ]> {
    let mut result = [ 0u8; N ];
    result.copy_from_slice(read(slice, N)?);
    Ok(result)
}

const TAG_NONE: u8 = 0;
const TAG_STR: u8 = 8;

/// Implements tagging and (de)serialization of the numeric operand variants.
macro_rules! impl_operand_codec {
    ($( $variant:ident ( $ty:ty ) = $tag:literal ),+ $(,)?) => {
        impl Operand {
            /// Serialized type tag of the operand.
            pub(crate) fn tag(self: &Self) -> u8 {
                match self {
                    Operand::None => TAG_NONE,
                    $( Operand::$variant(_) => $tag, )+
                    Operand::Str(_) => TAG_STR,
                }
            }
            /// Writes the operand payload (without tag).
            pub(crate) fn write_payload(self: &Self, out: &mut Vec<u8>) {
                match self {
                    Operand::None => { },
                    $( Operand::$variant(value) => out.extend_from_slice(&value.to_le_bytes()[..]), )+
                    Operand::Str(value) => {
                        // length prefix is u16, longer strings are cut off
                        let bytes = &value.as_bytes()[..value.len().min(u16::MAX as usize)];
                        out.extend_from_slice(&(bytes.len() as u16).to_le_bytes()[..]);
                        out.extend_from_slice(bytes);
                    },
                }
            }
            /// Reads an operand payload of the given tag.
            pub(crate) fn read_payload(tag: u8, input: &mut &[ u8 ]) -> LoadResult<Operand> {
                match tag {
                    TAG_NONE => Ok(Operand::None),
                    $( $tag => Ok(Operand::$variant(<$ty>::from_le_bytes(read_array(input)?))), )+
                    TAG_STR => {
                        let len = u16::from_le_bytes(read_array(input)?) as usize;
                        let bytes = read(input, len)?;
                        let text = std::str::from_utf8(bytes).map_err(|_| LoadError::InvalidString)?;
                        Ok(Operand::Str(text.to_string()))
                    },
                    _ => Err(LoadError::InvalidOperandTag(tag)),
                }
            }
        }
    };
}

impl_operand_codec!(
    U8(u8)      = 1,
    I8(i8)      = 2,
    U16(u16)    = 3,
    I16(i16)    = 4,
    U32(u32)    = 5,
    I32(i32)    = 6,
    F32(f32)    = 7,
);

impl Display for Operand {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::U8(v) => write!(f, "{}", v),
            Operand::I8(v) => write!(f, "{}", v),
            Operand::U16(v) => write!(f, "{}", v),
            Operand::I16(v) => write!(f, "{}", v),
            Operand::U32(v) => write!(f, "{}", v),
            Operand::I32(v) => write!(f, "{}", v),
            Operand::F32(v) => write!(f, "{:?}", v),
            Operand::Str(v) => write!(f, "{:?}", v),
        }
    }
}

/// A single VM instruction. `opcode` is kept raw so that unknown opcodes survive loading and are handled at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub opcode  : u8,
    /// Condition predicate. Zero means unconditional.
    pub flags   : u8,
    pub operand : Operand,
}

impl Instruction {
    /// Creates an unconditional instruction.
    pub fn new(opcode: OpCode, operand: Operand) -> Self {
        Instruction { opcode: opcode as u8, flags: 0, operand }
    }
    /// Sets the condition predicate.
    pub fn with_flags(self: Self, flags: u8) -> Self {
        Instruction { flags: flags & cond::ALL, ..self }
    }
    /// Decodes the opcode, `None` if it is not a known opcode.
    pub fn opcode(self: &Self) -> Option<OpCode> {
        OpCode::from_u8(self.opcode)
    }
    /// Appends the serialized instruction to the buffer.
    pub(crate) fn encode(self: &Self, out: &mut Vec<u8>) {
        out.push(self.opcode);
        out.push(self.flags);
        out.push(self.operand.tag());
        self.operand.write_payload(out);
    }
    /// Reads one serialized instruction from the front of the slice.
    pub(crate) fn decode(input: &mut &[ u8 ]) -> LoadResult<Instruction> {
        let [ opcode, flags, tag ] = read_array::<3>(input)?;
        let operand = Operand::read_payload(tag, input)?;
        Ok(Instruction { opcode, flags, operand })
    }
}

impl Display for Instruction {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode() {
            Some(opcode) => write!(f, "{}", opcode.mnemonic())?,
            None => write!(f, "<{:#04x}>", self.opcode)?,
        }
        if self.flags != 0 {
            write!(f, ".{}", cond::to_letters(self.flags))?;
        }
        match (self.opcode().map(|opcode| opcode.operand_kind()), &self.operand) {
            (_, Operand::None) => Ok(()),
            (Some(OperandKind::Register | OperandKind::OptRegister), Operand::U8(register)) => write!(f, " r{}", register),
            (Some(OperandKind::Mask), Operand::U8(mask)) => write!(f, " {}", cond::to_letters(*mask)),
            (_, operand) => write!(f, " {}", operand),
        }
    }
}
