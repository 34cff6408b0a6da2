
/// Maximum length of a token's text in bytes.
pub const MAX_TOKEN_LEN: usize = 128;

/// Maximum length of a declared symbol name in bytes.
pub const MAX_SYMBOL_LEN: usize = 64;

/// Maximum nesting depth of module blocks.
pub const MAX_NESTING: usize = 64;

/// Maximum length of a loaded program's name in bytes.
pub const MAX_PROGRAM_NAME_LEN: usize = 16;

/// Number of general purpose registers.
pub const NUM_GENERAL_REGISTERS: usize = 8;

/// Total number of registers: general purpose registers followed by PC and COND.
pub const NUM_REGISTERS: usize = NUM_GENERAL_REGISTERS + 2;

/// Register index of the program counter.
pub const REG_PC: usize = 8;

/// Register index of the condition flags.
pub const REG_COND: usize = 9;

/// Number of 64 bit memory cells available to each program.
pub const MEMORY_SIZE: usize = 16384;

/// Executable format magic.
pub const MAGIC: [ u8; 4 ] = *b"YANG";

/// Current (and highest supported) executable format version.
pub const CURRENT_VERSION: u16 = 1;

/// Exclusive upper bound of the number of sections in an executable.
pub const MAX_SECTIONS: u16 = 16;

/// Type of a register or memory cell.
pub type Cell = u64;

/// Type of an instruction index.
pub type InstructionIndex = u32;
