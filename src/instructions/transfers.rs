use crate::cpu::Cpu;
use crate::error::CpuError;

pub fn tax(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.x = cpu.accumulator;
    cpu.flags.set_zero_negative(cpu.x);
    Ok(())
}

pub fn tay(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.y = cpu.accumulator;
    cpu.flags.set_zero_negative(cpu.y);
    Ok(())
}

pub fn txa(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.accumulator = cpu.x;
    cpu.flags.set_zero_negative(cpu.accumulator);
    Ok(())
}

pub fn tya(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.accumulator = cpu.y;
    cpu.flags.set_zero_negative(cpu.accumulator);
    Ok(())
}

pub fn tsx(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.x = cpu.stack_pointer;
    cpu.flags.set_zero_negative(cpu.x);
    Ok(())
}

/// Stack pointer transfer; unlike the other transfers, does not touch flags.
pub fn txs(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.stack_pointer = cpu.x;
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
    fn tax_copies_a_into_x_and_sets_flags() {
        let mut cpu = cpu();
        cpu.accumulator = 0x80;
        tax(&mut cpu, None).unwrap();
        assert_eq!(cpu.x, 0x80);
        assert!(cpu.flags.contains(crate::cpu::flags::StatusFlags::NEGATIVE));
    }

    #[test]
    fn txs_does_not_affect_flags() {
        let mut cpu = cpu();
        cpu.x = 0x00;
        cpu.flags.insert(crate::cpu::flags::StatusFlags::ZERO);
        txs(&mut cpu, None).unwrap();
        assert_eq!(cpu.stack_pointer, 0x00);
        assert!(cpu.flags.contains(crate::cpu::flags::StatusFlags::ZERO));
    }
}
