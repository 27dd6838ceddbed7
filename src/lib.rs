//! A MOS 6502/2A03 instruction-set interpreter: registers, status flags,
//! addressing modes, the full documented opcode set plus the commonly
//! emulated illegal opcodes, an address-mapped memory bus, and an iNES
//! cartridge loader.

pub mod bus;
pub mod cpu;
pub mod error;
pub mod instructions;
pub mod rom;

pub use bus::Bus;
pub use cpu::Cpu;
pub use error::{CpuError, RomError};
pub use rom::Rom;
