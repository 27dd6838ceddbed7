use crate::cpu::flags::StatusFlags;
use crate::cpu::Cpu;
use crate::error::CpuError;

fn require(addr: Option<u16>) -> u16 {
    addr.expect("branches always resolve to the relative-offset operand address")
}

pub fn bcc(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.branch_if(!cpu.flags.contains(StatusFlags::CARRY), require(addr));
    Ok(())
}

pub fn bcs(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.branch_if(cpu.flags.contains(StatusFlags::CARRY), require(addr));
    Ok(())
}

pub fn beq(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.branch_if(cpu.flags.contains(StatusFlags::ZERO), require(addr));
    Ok(())
}

pub fn bne(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.branch_if(!cpu.flags.contains(StatusFlags::ZERO), require(addr));
    Ok(())
}

pub fn bmi(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.branch_if(cpu.flags.contains(StatusFlags::NEGATIVE), require(addr));
    Ok(())
}

pub fn bpl(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.branch_if(!cpu.flags.contains(StatusFlags::NEGATIVE), require(addr));
    Ok(())
}

pub fn bvc(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.branch_if(!cpu.flags.contains(StatusFlags::OVERFLOW), require(addr));
    Ok(())
}

pub fn bvs(cpu: &mut Cpu, addr: Option<u16>) -> Result<(), CpuError> {
    cpu.branch_if(cpu.flags.contains(StatusFlags::OVERFLOW), require(addr));
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
    fn beq_taken_advances_pc_by_signed_offset() {
        let mut cpu = cpu();
        cpu.flags.insert(StatusFlags::ZERO);
        cpu.bus.write_u8(0x1001, 0x10);
        cpu.program_counter = 0x1002; // as if fetch already advanced past the 2-byte instruction
        beq(&mut cpu, Some(0x1001)).unwrap();
        assert_eq!(cpu.program_counter, 0x1012);
    }

    #[test]
    fn bne_not_taken_leaves_pc_untouched() {
        let mut cpu = cpu();
        cpu.flags.insert(StatusFlags::ZERO);
        cpu.bus.write_u8(0x1001, 0x10);
        cpu.program_counter = 0x1002;
        bne(&mut cpu, Some(0x1001)).unwrap();
        assert_eq!(cpu.program_counter, 0x1002);
    }
}
