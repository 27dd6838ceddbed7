//! NOP family and the JAM/KIL/HLT halts.
//!
//! Every unofficial NOP opcode still goes through the addressing-mode
//! resolver (so its operand bytes are consumed and the program counter ends
//! up in the right place), but the handler itself does nothing.

use crate::cpu::Cpu;
use crate::error::CpuError;

pub fn nop(_cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    Ok(())
}

/// JAM (also called KIL/HLT): the real chip locks up and requires a reset.
/// This core models that by halting the driver loop rather than spinning.
pub fn jam(cpu: &mut Cpu, _addr: Option<u16>) -> Result<(), CpuError> {
    cpu.halted = true;
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
    fn nop_leaves_registers_untouched() {
        let mut cpu = cpu();
        cpu.accumulator = 0xAA;
        cpu.x = 0xBB;
        nop(&mut cpu, None).unwrap();
        assert_eq!(cpu.accumulator, 0xAA);
        assert_eq!(cpu.x, 0xBB);
    }

    #[test]
    fn jam_halts_the_driver_loop() {
        let mut cpu = cpu();
        assert!(!cpu.halted);
        jam(&mut cpu, None).unwrap();
        assert!(cpu.halted);
    }
}
