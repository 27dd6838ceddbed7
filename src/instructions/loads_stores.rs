use crate::cpu::Cpu;
use crate::error::CpuError;

fn require(addr: Option<u16>) -> u16 {
    addr.expect("load/store instructions always resolve to a memory address")
}

pub fn lda(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let value = cpu.bus.read_u8(require(addr));
    cpu.accumulator = value;
    cpu.flags.set_zero_negative(value);
    Ok(())
}

pub fn ldx(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let value = cpu.bus.read_u8(require(addr));
    cpu.x = value;
    cpu.flags.set_zero_negative(value);
    Ok(())
}

pub fn ldy(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let value = cpu.bus.read_u8(require(addr));
    cpu.y = value;
    cpu.flags.set_zero_negative(value);
    Ok(())
}

pub fn sta(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.bus.write_u8(require(addr), cpu.accumulator);
    Ok(())
}

pub fn stx(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.bus.write_u8(require(addr), cpu.x);
    Ok(())
}

pub fn sty(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.bus.write_u8(require(addr), cpu.y);
    Ok(())
}

/// Illegal: LDA and LDX from the same source in one instruction.
pub fn lax(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let value = cpu.bus.read_u8(require(addr));
    cpu.accumulator = value;
    cpu.x = value;
    cpu.flags.set_zero_negative(value);
    Ok(())
}

/// Illegal: store `A AND X`, no flags affected.
pub fn sax(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.bus.write_u8(require(addr), cpu.accumulator & cpu.x);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Bus;
    use crate::rom::Rom;

    fn cpu() -> Cpu {
        Cpu::new(Bus::new(Rom::test_rom()))
    }

    #[test]
    fn lda_sets_zero_and_negative() {
        let mut cpu = cpu();
        cpu.bus.write_u8(0x10, 0x00);
        lda(&mut cpu, Some(0x10)).unwrap();
        assert_eq!(cpu.accumulator, 0);
        assert!(cpu.flags.contains(crate::cpu::flags::StatusFlags::ZERO));
    }

    #[test]
    fn sta_writes_accumulator_to_memory() {
        let mut cpu = cpu();
        cpu.accumulator = 0x77;
        sta(&mut cpu, Some(0x10)).unwrap();
        assert_eq!(cpu.bus.read_u8(0x10), 0x77);
    }

    #[test]
    fn lax_loads_both_a_and_x() {
        let mut cpu = cpu();
        cpu.bus.write_u8(0x10, 0x55);
        lax(&mut cpu, Some(0x10)).unwrap();
        assert_eq!(cpu.accumulator, 0x55);
        assert_eq!(cpu.x, 0x55);
    }

    #[test]
    fn sax_stores_a_and_x() {
        let mut cpu = cpu();
        cpu.accumulator = 0b1100;
        cpu.x = 0b1010;
        sax(&mut cpu, Some(0x10)).unwrap();
        assert_eq!(cpu.bus.read_u8(0x10), 0b1000);
    }
}
