use crate::cpu::flags::StatusFlags;
use crate::cpu::{Cpu, IRQ_BRK_VECTOR};
use crate::error::CpuError;

fn require(addr: Option<u16>) -> u16 {
    addr.expect("jumps always resolve to a target address")
}

pub fn jmp(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.program_counter = require(addr);
    Ok(())
}

/// Push the address of the last byte of the JSR operand, then jump.
pub fn jsr(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let target = require(addr);
    // program_counter already points past the 3-byte JSR instruction.
    let return_addr = cpu.program_counter.wrapping_sub(1);
    cpu.push_u16(return_addr)?;
    cpu.program_counter = target;
    Ok(())
}

pub fn rts(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    let return_addr = cpu.pull_u16()?;
    cpu.program_counter = return_addr.wrapping_add(1);
    Ok(())
}

/// Pushes PC and status (with Break/Unused forced to 1), sets Interrupt
/// Disable, then vectors through 0xFFFE/0xFFFF: implements BRK's full
/// push/vector sequence rather than treating Break as a bare flag.
pub fn brk(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    // program_counter already points past BRK's opcode byte; BRK additionally
    // skips a padding byte, so push PC+1 from here (PC+2 from the opcode).
    let return_addr = cpu.program_counter.wrapping_add(1);
    cpu.push_u16(return_addr)?;
    cpu.push_u8(cpu.flags.to_pushed_byte())?;
    cpu.flags.insert(StatusFlags::INTERRUPT_DISABLE);
    cpu.program_counter = cpu.bus.read_u16(IRQ_BRK_VECTOR);
    Ok(())
}

/// Pulls status (Break/Unused discarded) then PC, used verbatim.
pub fn rti(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    let byte = cpu.pull_u8()?;
    cpu.flags = StatusFlags::from_pulled_byte(byte);
    cpu.program_counter = cpu.pull_u16()?;
    Ok(())
}
