use crate::cpu::Cpu;
use crate::error::CpuError;

fn require(addr: Option<u16>) -> u16 {
    addr.expect("INC/DEC always resolve to a memory address")
}

pub fn inc(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let addr = require(addr);
    let value = cpu.bus.read_u8(addr).wrapping_add(1);
    cpu.bus.write_u8(addr, value);
    cpu.flags.set_zero_negative(value);
    Ok(())
}

pub fn dec(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    let addr = require(addr);
    let value = cpu.bus.read_u8(addr).wrapping_sub(1);
    cpu.bus.write_u8(addr, value);
    cpu.flags.set_zero_negative(value);
    Ok(())
}

pub fn inx(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.flags.set_zero_negative(cpu.x);
    Ok(())
}

pub fn iny(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.flags.set_zero_negative(cpu.y);
    Ok(())
}

pub fn dex(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.flags.set_zero_negative(cpu.x);
    Ok(())
}

pub fn dey(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.flags.set_zero_negative(cpu.y);
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
    fn inx_then_dex_is_identity() {
        let mut cpu = cpu();
        let original = cpu.x;
        inx(&mut cpu, None).unwrap();
        dex(&mut cpu, None).unwrap();
        assert_eq!(cpu.x, original);
    }

    #[test]
    fn inc_wraps_at_0xff() {
        let mut cpu = cpu();
        cpu.bus.write_u8(0x10, 0xFF);
        inc(&mut cpu, Some(0x10)).unwrap();
        assert_eq!(cpu.bus.read_u8(0x10), 0x00);
        assert!(cpu.flags.contains(crate::cpu::flags::StatusFlags::ZERO));
    }
}
