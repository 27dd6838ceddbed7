use crate::cpu::flags::StatusFlags;
use crate::cpu::Cpu;
use crate::error::CpuError;

fn require(addr: Option<u16>) -> u16 {
    addr.expect("arithmetic instructions always resolve to a memory address")
}

/// Shared ADC core: `A + operand + carry`, used directly by ADC and (with an
/// inverted operand) by SBC.
pub(crate) fn add_with_carry(cpu: &mut Cpu, operand: u8) {
    let carry_in = cpu.flags.contains(StatusFlags::CARRY) as u16;
    let sum = cpu.accumulator as u16 + operand as u16 + carry_in;
    let result = sum as u8;

    let overflow = (cpu.accumulator ^ operand) & 0x80 == 0 && (cpu.accumulator ^ result) & 0x80 != 0;

    cpu.flags.set(StatusFlags::CARRY, sum > 0xFF);
    cpu.flags.set(StatusFlags::OVERFLOW, overflow);
    cpu.flags.set_zero_negative(result);
    cpu.accumulator = result;
}

pub fn adc(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let operand = cpu.bus.read_u8(require(addr));
    add_with_carry(cpu, operand);
    Ok(())
}

/// `A - M - (1 - C)`, implemented as ADC with the operand's ones' complement.
pub fn sbc(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let operand = cpu.bus.read_u8(require(addr));
    add_with_carry(cpu, !operand);
    Ok(())
}

pub(crate) fn compare(cpu: &mut Cpu, register: u8, operand: u8) {
    let diff = register.wrapping_sub(operand);
    cpu.flags.set(StatusFlags::CARRY, register >= operand);
    cpu.flags.set(StatusFlags::ZERO, register == operand);
    cpu.flags.set(StatusFlags::NEGATIVE, diff & 0x80 != 0);
}

pub fn cmp(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let operand = cpu.bus.read_u8(require(addr));
    compare(cpu, cpu.accumulator, operand);
    Ok(())
}

pub fn cpx(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let operand = cpu.bus.read_u8(require(addr));
    compare(cpu, cpu.x, operand);
    Ok(())
}

pub fn cpy(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let operand = cpu.bus.read_u8(require(addr));
    compare(cpu, cpu.y, operand);
    Ok(())
}
