use thiserror::Error;

/// Failures that can occur while parsing an iNES cartridge image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RomError {
    #[error("missing or invalid iNES magic number")]
    BadMagic,

    #[error("mapper {0} is not supported (only mapper 0 / NROM is implemented)")]
    UnsupportedMapper(u8),

    #[error("only iNES revision 1.0 is supported")]
    UnsupportedRevision,

    #[error("truncated ROM image: expected at least {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Fatal faults raised while executing instructions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    #[error("invalid opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    InvalidOpcode { opcode: u8, pc: u16 },

    #[error("stack overflow: push with stack pointer at 0x00")]
    StackOverflow,

    #[error("stack underflow: pull with stack pointer at 0xFF")]
    StackUnderflow,
}
