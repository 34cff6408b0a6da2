//! Executable image and its serialized form.

use crate::prelude::*;
use crate::config::{MAGIC, CURRENT_VERSION, MAX_SECTIONS};
use crate::bytecode::{Instruction, error::{LoadError, LoadResult}, instruction::{read, read_array}};

/// Kind of an executable section.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Data,
    Function,
    /// Section containing the program entry point.
    Entry,
}

/// A range of instructions within an executable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub kind    : SectionKind,
    /// Index of the first instruction of the section.
    pub offset  : u32,
    /// Number of instructions in the section.
    pub length  : u32,
}

/// A yang executable image. Images are produced by the [assembler](crate::assembler::assemble) or read
/// via [Program::from_bytes] and are instantiated by the [Engine](crate::runtime::Engine).
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub(crate) version      : u16,
    pub(crate) sections     : Vec<Section>,
    pub(crate) instructions : Vec<Instruction>,
}

impl Program {
    /// Creates a current version image with a single entry section spanning all instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program {
            version     : CURRENT_VERSION,
            sections    : vec![ Section { kind: SectionKind::Entry, offset: 0, length: instructions.len() as u32 } ],
            instructions: instructions,
        }
    }
    /// Executable format version.
    pub fn version(self: &Self) -> u16 {
        self.version
    }
    pub fn sections(self: &Self) -> &[ Section ] {
        &self.sections
    }
    pub fn instructions(self: &Self) -> &[ Instruction ] {
        &self.instructions
    }
    /// Returns the number of instructions.
    pub fn len(self: &Self) -> usize {
        self.instructions.len()
    }
    pub fn is_empty(self: &Self) -> bool {
        self.instructions.is_empty()
    }
    /// Returns the program as a vector of bytes.
    pub fn to_bytes(self: &Self) -> Vec<u8> {
        let mut result = Vec::with_capacity(12 + 3 * self.instructions.len());
        result.extend_from_slice(&MAGIC[..]);
        result.extend_from_slice(&self.version.to_le_bytes()[..]);
        result.extend_from_slice(&(self.sections.len().max(1) as u16).to_le_bytes()[..]);
        result.extend_from_slice(&(self.instructions.len() as u32).to_le_bytes()[..]);
        for instruction in &self.instructions {
            instruction.encode(&mut result);
        }
        result
    }
    /// Creates a program from bytes. Bytes following the last instruction are ignored.
    pub fn from_bytes(bytes: &[ u8 ]) -> LoadResult<Program> {
        let mut input = bytes;
        if read(&mut input, 4).ok() != Some(&MAGIC[..]) {
            return Err(LoadError::BadMagic);
        }
        let version = u16::from_le_bytes(read_array(&mut input)?);
        if version == 0 || version > CURRENT_VERSION {
            return Err(LoadError::UnsupportedVersion(version));
        }
        let num_sections = u16::from_le_bytes(read_array(&mut input)?);
        if num_sections == 0 || num_sections >= MAX_SECTIONS {
            return Err(LoadError::InvalidSectionCount(num_sections));
        }
        let num_instructions = u32::from_le_bytes(read_array(&mut input)?);
        // each instruction takes at least 3 bytes
        let mut instructions = Vec::with_capacity((num_instructions as usize).min(input.len() / 3));
        for _ in 0..num_instructions {
            instructions.push(Instruction::decode(&mut input)?);
        }
        Ok(Program::new(instructions))
    }
    /// Renders the program as assembly text, one instruction per line prefixed with its index.
    pub fn disassemble(self: &Self) -> String {
        let width = self.instructions.len().saturating_sub(1).to_string().len();
        let mut result = String::new();
        for (index, instruction) in self.instructions.iter().enumerate() {
            result.push_str(&format!("{:>width$}  {}\n", index, instruction, width = width));
        }
        result
    }
}

impl Display for Program {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disassemble())
    }
}
