use crate::cpu::flags::StatusFlags;
use crate::cpu::Cpu;
use crate::error::CpuError;

pub fn clc(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.flags.remove(StatusFlags::CARRY);
    Ok(())
}

pub fn sec(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.flags.insert(StatusFlags::CARRY);
    Ok(())
}

pub fn cld(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.flags.remove(StatusFlags::DECIMAL);
    Ok(())
}

pub fn sed(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.flags.insert(StatusFlags::DECIMAL);
    Ok(())
}

pub fn cli(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.flags.remove(StatusFlags::INTERRUPT_DISABLE);
    Ok(())
}

pub fn sei(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.flags.insert(StatusFlags::INTERRUPT_DISABLE);
    Ok(())
}

pub fn clv(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.flags.remove(StatusFlags::OVERFLOW);
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
    fn sec_then_clc_toggles_carry() {
        let mut cpu = cpu();
        sec(&mut cpu, None).unwrap();
        assert!(cpu.flags.contains(StatusFlags::CARRY));
        clc(&mut cpu, None).unwrap();
        assert!(!cpu.flags.contains(StatusFlags::CARRY));
    }

    #[test]
    fn sed_sets_decimal_but_arithmetic_ignores_it() {
        let mut cpu = cpu();
        sed(&mut cpu, None).unwrap();
        assert!(cpu.flags.contains(StatusFlags::DECIMAL));
    }
}
