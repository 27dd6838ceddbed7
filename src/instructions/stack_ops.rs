use crate::cpu::flags::StatusFlags;
use crate::cpu::Cpu;
use crate::error::CpuError;

pub fn pha(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.push_u8(cpu.accumulator)
}

pub fn pla(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    let value = cpu.pull_u8()?;
    cpu.accumulator = value;
    cpu.flags.set_zero_negative(value);
    Ok(())
}

/// Pushes status with Break and Unused forced to 1; the CPU's own flags are
/// left untouched (those bits exist only in the pushed byte).
pub fn php(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.push_u8(cpu.flags.to_pushed_byte())
}

pub fn plp(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    let byte = cpu.pull_u8()?;
    cpu.flags = StatusFlags::from_pulled_byte(byte);
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
    fn pha_then_pla_is_identity() {
        let mut cpu = cpu();
        cpu.accumulator = 0x99;
        pha(&mut cpu, None).unwrap();
        cpu.accumulator = 0x00;
        pla(&mut cpu, None).unwrap();
        assert_eq!(cpu.accumulator, 0x99);
    }

    #[test]
    fn php_then_plp_restores_real_flags() {
        let mut cpu = cpu();
        cpu.flags = StatusFlags::CARRY | StatusFlags::NEGATIVE;
        php(&mut cpu, None).unwrap();
        cpu.flags = StatusFlags::empty();
        plp(&mut cpu, None).unwrap();
        assert_eq!(cpu.flags, StatusFlags::CARRY | StatusFlags::NEGATIVE);
    }
}
