//! The 6502/2A03 instruction interpreter.

pub mod addressing;
pub mod dispatch;
pub mod flags;
pub mod trace;

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::bus::Bus;
use crate::error::CpuError;
use addressing::{resolve, AddressingMode};
use flags::StatusFlags;

pub const STACK_BASE: u16 = 0x0100;
pub const RESET_STACK_POINTER: u8 = 0xFD;
const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_BRK_VECTOR: u16 = 0xFFFE;

pub struct Cpu {
    pub accumulator: u8,
    pub x: u8,
    pub y: u8,
    pub stack_pointer: u8,
    pub program_counter: u16,
    pub flags: StatusFlags,
    pub bus: Bus,
    pub halted: bool,
    pub(crate) cycles: u64,
    trace_writer: Option<BufWriter<File>>,
}

impl Cpu {
    pub fn new(bus: Bus) -> Cpu {
        Cpu {
            accumulator: 0,
            x: 0,
            y: 0,
            stack_pointer: RESET_STACK_POINTER,
            program_counter: 0,
            flags: StatusFlags::reset_value(),
            bus,
            halted: false,
            cycles: 0,
            trace_writer: None,
        }
    }

    /// Enables nestest-style execution tracing for the rest of this CPU's
    /// lifetime, one line per `step()` written to `file`. The writer is
    /// buffered and flushed when the `Cpu` is dropped.
    pub fn open_trace_log(&mut self, file: File) {
        self.trace_writer = Some(BufWriter::new(file));
    }

    /// Reinitialise registers and load the program counter from the reset vector.
    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.x = 0;
        self.y = 0;
        self.stack_pointer = RESET_STACK_POINTER;
        self.flags = StatusFlags::reset_value();
        self.halted = false;
        self.program_counter = self.bus.read_u16(RESET_VECTOR);
    }

    pub fn push_u8(&mut self, value: u8) -> Result<(), CpuError> {
        if self.stack_pointer == 0x00 {
            return Err(CpuError::StackOverflow);
        }
        self.bus.write_u8(STACK_BASE + self.stack_pointer as u16, value);
        self.stack_pointer = self.stack_pointer.wrapping_sub(1);
        Ok(())
    }

    pub fn pull_u8(&mut self) -> Result<u8, CpuError> {
        if self.stack_pointer == 0xFF {
            return Err(CpuError::StackUnderflow);
        }
        self.stack_pointer = self.stack_pointer.wrapping_add(1);
        Ok(self.bus.read_u8(STACK_BASE + self.stack_pointer as u16))
    }

    pub fn push_u16(&mut self, value: u16) -> Result<(), CpuError> {
        let [lo, hi] = value.to_le_bytes();
        self.push_u8(hi)?;
        self.push_u8(lo)?;
        Ok(())
    }

    pub fn pull_u16(&mut self) -> Result<u16, CpuError> {
        let lo = self.pull_u8()?;
        let hi = self.pull_u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Fetch, decode, and execute exactly one instruction.
    pub fn step(&mut self) -> Result<(), CpuError> {
        if self.trace_writer.is_some() {
            let line = trace::trace(self);
            if let Some(writer) = self.trace_writer.as_mut() {
                let _ = writeln!(writer, "{line}");
            }
        }

        let pc_before = self.program_counter;
        let opcode = self.bus.read_u8(pc_before);
        let instruction = dispatch::lookup(opcode).ok_or(CpuError::InvalidOpcode {
            opcode,
            pc: pc_before,
        })?;

        let operand_addr = resolve(self, instruction.mode);

        // The program counter advances past the instruction's bytes as part of
        // fetch, before the handler runs; control-flow handlers (branches,
        // JMP/JSR/RTS/RTI) overwrite it afterwards.
        self.program_counter = pc_before.wrapping_add(instruction.mode.instruction_len());

        (instruction.handler)(self, operand_addr)?;
        self.cycles += 1;
        Ok(())
    }

    /// Run until a fatal error or `halted` is set.
    pub fn run(&mut self) -> Result<(), CpuError> {
        self.run_with_callback(|_| {})
    }

    /// Run until a fatal error or `halted` is set, invoking `callback` with a
    /// mutable reference to the CPU between every instruction. This is the
    /// hook a host uses to poll input, seed entropy, or paint a framebuffer.
    pub fn run_with_callback<F: FnMut(&mut Cpu)>(&mut self, mut callback: F) -> Result<(), CpuError> {
        while !self.halted {
            callback(self);
            if let Err(err) = self.step() {
                log::error!("halting after fatal error: {err}");
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn branch_if(&mut self, condition: bool, operand_addr: u16) {
        if !condition {
            return;
        }
        let offset = self.bus.read_u8(operand_addr) as i8;
        self.program_counter = self.program_counter.wrapping_add(offset as u16);
    }
}

impl Drop for Cpu {
    fn drop(&mut self) {
        if let Some(writer) = self.trace_writer.as_mut() {
            let _ = writer.flush();
        }
    }
}
