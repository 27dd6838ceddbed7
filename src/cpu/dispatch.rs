//! The 256-entry opcode dispatch table: for every byte value, which mnemonic,
//! addressing mode, and executor it names. Built once as a `phf::Map`, a
//! compile-time perfect-hash map from opcode byte to `Instruction`.

use phf::{phf_map, Map};

use super::addressing::AddressingMode;
use super::Cpu;
use crate::error::CpuError;
use crate::instructions::*;

pub type Handler = fn(&mut Cpu, Option<u16>) -> Result<(), CpuError>;

#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub handler: Handler,
    /// True for undocumented opcodes; used by the trace formatter to mark
    /// them the way `nestest.log` does (a leading `*`).
    pub illegal: bool,
}

const fn op(mnemonic: &'static str, mode: AddressingMode, handler: Handler) -> Instruction {
    Instruction { mnemonic, mode, handler, illegal: false }
}

const fn illegal_op(mnemonic: &'static str, mode: AddressingMode, handler: Handler) -> Instruction {
    Instruction { mnemonic, mode, handler, illegal: true }
}

pub fn lookup(opcode: u8) -> Option<&'static Instruction> {
    OPCODES.get(&opcode)
}

use AddressingMode::{
    Absolute, AbsoluteX, AbsoluteY, Accumulator, Immediate, Implied, Indirect, IndirectX,
    IndirectY, Relative, ZeroPage, ZeroPageX, ZeroPageY,
};

static OPCODES: Map<u8, Instruction> = phf_map! {
    // 0x0_
    0x00u8 => op("BRK", Implied, jumps::brk),
    0x01u8 => op("ORA", IndirectX, logic::ora),
    0x02u8 => illegal_op("JAM", Implied, system::jam),
    0x03u8 => illegal_op("SLO", IndirectX, shifts::slo),
    0x04u8 => illegal_op("NOP", ZeroPage, system::nop),
    0x05u8 => op("ORA", ZeroPage, logic::ora),
    0x06u8 => op("ASL", ZeroPage, shifts::asl),
    0x07u8 => illegal_op("SLO", ZeroPage, shifts::slo),
    0x08u8 => op("PHP", Implied, stack_ops::php),
    0x09u8 => op("ORA", Immediate, logic::ora),
    0x0Au8 => op("ASL", Accumulator, shifts::asl),
    0x0Bu8 => illegal_op("ANC", Immediate, illegal::anc),
    0x0Cu8 => illegal_op("NOP", Absolute, system::nop),
    0x0Du8 => op("ORA", Absolute, logic::ora),
    0x0Eu8 => op("ASL", Absolute, shifts::asl),
    0x0Fu8 => illegal_op("SLO", Absolute, shifts::slo),

    // 0x1_
    0x10u8 => op("BPL", Relative, branches::bpl),
    0x11u8 => op("ORA", IndirectY, logic::ora),
    0x12u8 => illegal_op("JAM", Implied, system::jam),
    0x13u8 => illegal_op("SLO", IndirectY, shifts::slo),
    0x14u8 => illegal_op("NOP", ZeroPageX, system::nop),
    0x15u8 => op("ORA", ZeroPageX, logic::ora),
    0x16u8 => op("ASL", ZeroPageX, shifts::asl),
    0x17u8 => illegal_op("SLO", ZeroPageX, shifts::slo),
    0x18u8 => op("CLC", Implied, flags_ops::clc),
    0x19u8 => op("ORA", AbsoluteY, logic::ora),
    0x1Au8 => illegal_op("NOP", Implied, system::nop),
    0x1Bu8 => illegal_op("SLO", AbsoluteY, shifts::slo),
    0x1Cu8 => illegal_op("NOP", AbsoluteX, system::nop),
    0x1Du8 => op("ORA", AbsoluteX, logic::ora),
    0x1Eu8 => op("ASL", AbsoluteX, shifts::asl),
    0x1Fu8 => illegal_op("SLO", AbsoluteX, shifts::slo),

    // 0x2_
    0x20u8 => op("JSR", Absolute, jumps::jsr),
    0x21u8 => op("AND", IndirectX, logic::and),
    0x22u8 => illegal_op("JAM", Implied, system::jam),
    0x23u8 => illegal_op("RLA", IndirectX, shifts::rla),
    0x24u8 => op("BIT", ZeroPage, logic::bit),
    0x25u8 => op("AND", ZeroPage, logic::and),
    0x26u8 => op("ROL", ZeroPage, shifts::rol),
    0x27u8 => illegal_op("RLA", ZeroPage, shifts::rla),
    0x28u8 => op("PLP", Implied, stack_ops::plp),
    0x29u8 => op("AND", Immediate, logic::and),
    0x2Au8 => op("ROL", Accumulator, shifts::rol),
    0x2Bu8 => illegal_op("ANC", Immediate, illegal::anc),
    0x2Cu8 => op("BIT", Absolute, logic::bit),
    0x2Du8 => op("AND", Absolute, logic::and),
    0x2Eu8 => op("ROL", Absolute, shifts::rol),
    0x2Fu8 => illegal_op("RLA", Absolute, shifts::rla),

    // 0x3_
    0x30u8 => op("BMI", Relative, branches::bmi),
    0x31u8 => op("AND", IndirectY, logic::and),
    0x32u8 => illegal_op("JAM", Implied, system::jam),
    0x33u8 => illegal_op("RLA", IndirectY, shifts::rla),
    0x34u8 => illegal_op("NOP", ZeroPageX, system::nop),
    0x35u8 => op("AND", ZeroPageX, logic::and),
    0x36u8 => op("ROL", ZeroPageX, shifts::rol),
    0x37u8 => illegal_op("RLA", ZeroPageX, shifts::rla),
    0x38u8 => op("SEC", Implied, flags_ops::sec),
    0x39u8 => op("AND", AbsoluteY, logic::and),
    0x3Au8 => illegal_op("NOP", Implied, system::nop),
    0x3Bu8 => illegal_op("RLA", AbsoluteY, shifts::rla),
    0x3Cu8 => illegal_op("NOP", AbsoluteX, system::nop),
    0x3Du8 => op("AND", AbsoluteX, logic::and),
    0x3Eu8 => op("ROL", AbsoluteX, shifts::rol),
    0x3Fu8 => illegal_op("RLA", AbsoluteX, shifts::rla),

    // 0x4_
    0x40u8 => op("RTI", Implied, jumps::rti),
    0x41u8 => op("EOR", IndirectX, logic::eor),
    0x42u8 => illegal_op("JAM", Implied, system::jam),
    0x43u8 => illegal_op("SRE", IndirectX, shifts::sre),
    0x44u8 => illegal_op("NOP", ZeroPage, system::nop),
    0x45u8 => op("EOR", ZeroPage, logic::eor),
    0x46u8 => op("LSR", ZeroPage, shifts::lsr),
    0x47u8 => illegal_op("SRE", ZeroPage, shifts::sre),
    0x48u8 => op("PHA", Implied, stack_ops::pha),
    0x49u8 => op("EOR", Immediate, logic::eor),
    0x4Au8 => op("LSR", Accumulator, shifts::lsr),
    0x4Bu8 => illegal_op("ALR", Immediate, illegal::alr),
    0x4Cu8 => op("JMP", Absolute, jumps::jmp),
    0x4Du8 => op("EOR", Absolute, logic::eor),
    0x4Eu8 => op("LSR", Absolute, shifts::lsr),
    0x4Fu8 => illegal_op("SRE", Absolute, shifts::sre),

    // 0x5_
    0x50u8 => op("BVC", Relative, branches::bvc),
    0x51u8 => op("EOR", IndirectY, logic::eor),
    0x52u8 => illegal_op("JAM", Implied, system::jam),
    0x53u8 => illegal_op("SRE", IndirectY, shifts::sre),
    0x54u8 => illegal_op("NOP", ZeroPageX, system::nop),
    0x55u8 => op("EOR", ZeroPageX, logic::eor),
    0x56u8 => op("LSR", ZeroPageX, shifts::lsr),
    0x57u8 => illegal_op("SRE", ZeroPageX, shifts::sre),
    0x58u8 => op("CLI", Implied, flags_ops::cli),
    0x59u8 => op("EOR", AbsoluteY, logic::eor),
    0x5Au8 => illegal_op("NOP", Implied, system::nop),
    0x5Bu8 => illegal_op("SRE", AbsoluteY, shifts::sre),
    0x5Cu8 => illegal_op("NOP", AbsoluteX, system::nop),
    0x5Du8 => op("EOR", AbsoluteX, logic::eor),
    0x5Eu8 => op("LSR", AbsoluteX, shifts::lsr),
    0x5Fu8 => illegal_op("SRE", AbsoluteX, shifts::sre),

    // 0x6_
    0x60u8 => op("RTS", Implied, jumps::rts),
    0x61u8 => op("ADC", IndirectX, arithmetic::adc),
    0x62u8 => illegal_op("JAM", Implied, system::jam),
    0x63u8 => illegal_op("RRA", IndirectX, shifts::rra),
    0x64u8 => illegal_op("NOP", ZeroPage, system::nop),
    0x65u8 => op("ADC", ZeroPage, arithmetic::adc),
    0x66u8 => op("ROR", ZeroPage, shifts::ror),
    0x67u8 => illegal_op("RRA", ZeroPage, shifts::rra),
    0x68u8 => op("PLA", Implied, stack_ops::pla),
    0x69u8 => op("ADC", Immediate, arithmetic::adc),
    0x6Au8 => op("ROR", Accumulator, shifts::ror),
    0x6Bu8 => illegal_op("ARR", Immediate, illegal::arr),
    0x6Cu8 => op("JMP", Indirect, jumps::jmp),
    0x6Du8 => op("ADC", Absolute, arithmetic::adc),
    0x6Eu8 => op("ROR", Absolute, shifts::ror),
    0x6Fu8 => illegal_op("RRA", Absolute, shifts::rra),

    // 0x7_
    0x70u8 => op("BVS", Relative, branches::bvs),
    0x71u8 => op("ADC", IndirectY, arithmetic::adc),
    0x72u8 => illegal_op("JAM", Implied, system::jam),
    0x73u8 => illegal_op("RRA", IndirectY, shifts::rra),
    0x74u8 => illegal_op("NOP", ZeroPageX, system::nop),
    0x75u8 => op("ADC", ZeroPageX, arithmetic::adc),
    0x76u8 => op("ROR", ZeroPageX, shifts::ror),
    0x77u8 => illegal_op("RRA", ZeroPageX, shifts::rra),
    0x78u8 => op("SEI", Implied, flags_ops::sei),
    0x79u8 => op("ADC", AbsoluteY, arithmetic::adc),
    0x7Au8 => illegal_op("NOP", Implied, system::nop),
    0x7Bu8 => illegal_op("RRA", AbsoluteY, shifts::rra),
    0x7Cu8 => illegal_op("NOP", AbsoluteX, system::nop),
    0x7Du8 => op("ADC", AbsoluteX, arithmetic::adc),
    0x7Eu8 => op("ROR", AbsoluteX, shifts::ror),
    0x7Fu8 => illegal_op("RRA", AbsoluteX, shifts::rra),

    // 0x8_
    0x80u8 => illegal_op("NOP", Immediate, system::nop),
    0x81u8 => op("STA", IndirectX, loads_stores::sta),
    0x82u8 => illegal_op("NOP", Immediate, system::nop),
    0x83u8 => illegal_op("SAX", IndirectX, loads_stores::sax),
    0x84u8 => op("STY", ZeroPage, loads_stores::sty),
    0x85u8 => op("STA", ZeroPage, loads_stores::sta),
    0x86u8 => op("STX", ZeroPage, loads_stores::stx),
    0x87u8 => illegal_op("SAX", ZeroPage, loads_stores::sax),
    0x88u8 => op("DEY", Implied, increments::dey),
    0x89u8 => illegal_op("NOP", Immediate, system::nop),
    0x8Au8 => op("TXA", Implied, transfers::txa),
    0x8Bu8 => illegal_op("XAA", Immediate, illegal::xaa),
    0x8Cu8 => op("STY", Absolute, loads_stores::sty),
    0x8Du8 => op("STA", Absolute, loads_stores::sta),
    0x8Eu8 => op("STX", Absolute, loads_stores::stx),
    0x8Fu8 => illegal_op("SAX", Absolute, loads_stores::sax),

    // 0x9_
    0x90u8 => op("BCC", Relative, branches::bcc),
    0x91u8 => op("STA", IndirectY, loads_stores::sta),
    0x92u8 => illegal_op("JAM", Implied, system::jam),
    0x93u8 => illegal_op("SHA", IndirectY, illegal::sha),
    0x94u8 => op("STY", ZeroPageX, loads_stores::sty),
    0x95u8 => op("STA", ZeroPageX, loads_stores::sta),
    0x96u8 => op("STX", ZeroPageY, loads_stores::stx),
    0x97u8 => illegal_op("SAX", ZeroPageY, loads_stores::sax),
    0x98u8 => op("TYA", Implied, transfers::tya),
    0x99u8 => op("STA", AbsoluteY, loads_stores::sta),
    0x9Au8 => op("TXS", Implied, transfers::txs),
    0x9Bu8 => illegal_op("TAS", AbsoluteY, illegal::tas),
    0x9Cu8 => illegal_op("SHY", AbsoluteX, illegal::shy),
    0x9Du8 => op("STA", AbsoluteX, loads_stores::sta),
    0x9Eu8 => illegal_op("SHX", AbsoluteY, illegal::shx),
    0x9Fu8 => illegal_op("SHA", AbsoluteY, illegal::sha),

    // 0xA_
    0xA0u8 => op("LDY", Immediate, loads_stores::ldy),
    0xA1u8 => op("LDA", IndirectX, loads_stores::lda),
    0xA2u8 => op("LDX", Immediate, loads_stores::ldx),
    0xA3u8 => illegal_op("LAX", IndirectX, loads_stores::lax),
    0xA4u8 => op("LDY", ZeroPage, loads_stores::ldy),
    0xA5u8 => op("LDA", ZeroPage, loads_stores::lda),
    0xA6u8 => op("LDX", ZeroPage, loads_stores::ldx),
    0xA7u8 => illegal_op("LAX", ZeroPage, loads_stores::lax),
    0xA8u8 => op("TAY", Implied, transfers::tay),
    0xA9u8 => op("LDA", Immediate, loads_stores::lda),
    0xAAu8 => op("TAX", Implied, transfers::tax),
    0xABu8 => illegal_op("LXA", Immediate, illegal::lxa),
    0xACu8 => op("LDY", Absolute, loads_stores::ldy),
    0xADu8 => op("LDA", Absolute, loads_stores::lda),
    0xAEu8 => op("LDX", Absolute, loads_stores::ldx),
    0xAFu8 => illegal_op("LAX", Absolute, loads_stores::lax),

    // 0xB_
    0xB0u8 => op("BCS", Relative, branches::bcs),
    0xB1u8 => op("LDA", IndirectY, loads_stores::lda),
    0xB2u8 => illegal_op("JAM", Implied, system::jam),
    0xB3u8 => illegal_op("LAX", IndirectY, loads_stores::lax),
    0xB4u8 => op("LDY", ZeroPageX, loads_stores::ldy),
    0xB5u8 => op("LDA", ZeroPageX, loads_stores::lda),
    0xB6u8 => op("LDX", ZeroPageY, loads_stores::ldx),
    0xB7u8 => illegal_op("LAX", ZeroPageY, loads_stores::lax),
    0xB8u8 => op("CLV", Implied, flags_ops::clv),
    0xB9u8 => op("LDA", AbsoluteY, loads_stores::lda),
    0xBAu8 => op("TSX", Implied, transfers::tsx),
    0xBBu8 => illegal_op("LAS", AbsoluteY, illegal::las),
    0xBCu8 => op("LDY", AbsoluteX, loads_stores::ldy),
    0xBDu8 => op("LDA", AbsoluteX, loads_stores::lda),
    0xBEu8 => op("LDX", AbsoluteY, loads_stores::ldx),
    0xBFu8 => illegal_op("LAX", AbsoluteY, loads_stores::lax),

    // 0xC_
    0xC0u8 => op("CPY", Immediate, arithmetic::cpy),
    0xC1u8 => op("CMP", IndirectX, arithmetic::cmp),
    0xC2u8 => illegal_op("NOP", Immediate, system::nop),
    0xC3u8 => illegal_op("DCP", IndirectX, illegal::dcp),
    0xC4u8 => op("CPY", ZeroPage, arithmetic::cpy),
    0xC5u8 => op("CMP", ZeroPage, arithmetic::cmp),
    0xC6u8 => op("DEC", ZeroPage, increments::dec),
    0xC7u8 => illegal_op("DCP", ZeroPage, illegal::dcp),
    0xC8u8 => op("INY", Implied, increments::iny),
    0xC9u8 => op("CMP", Immediate, arithmetic::cmp),
    0xCAu8 => op("DEX", Implied, increments::dex),
    0xCBu8 => illegal_op("SBX", Immediate, illegal::sbx),
    0xCCu8 => op("CPY", Absolute, arithmetic::cpy),
    0xCDu8 => op("CMP", Absolute, arithmetic::cmp),
    0xCEu8 => op("DEC", Absolute, increments::dec),
    0xCFu8 => illegal_op("DCP", Absolute, illegal::dcp),

    // 0xD_
    0xD0u8 => op("BNE", Relative, branches::bne),
    0xD1u8 => op("CMP", IndirectY, arithmetic::cmp),
    0xD2u8 => illegal_op("JAM", Implied, system::jam),
    0xD3u8 => illegal_op("DCP", IndirectY, illegal::dcp),
    0xD4u8 => illegal_op("NOP", ZeroPageX, system::nop),
    0xD5u8 => op("CMP", ZeroPageX, arithmetic::cmp),
    0xD6u8 => op("DEC", ZeroPageX, increments::dec),
    0xD7u8 => illegal_op("DCP", ZeroPageX, illegal::dcp),
    0xD8u8 => op("CLD", Implied, flags_ops::cld),
    0xD9u8 => op("CMP", AbsoluteY, arithmetic::cmp),
    0xDAu8 => illegal_op("NOP", Implied, system::nop),
    0xDBu8 => illegal_op("DCP", AbsoluteY, illegal::dcp),
    0xDCu8 => illegal_op("NOP", AbsoluteX, system::nop),
    0xDDu8 => op("CMP", AbsoluteX, arithmetic::cmp),
    0xDEu8 => op("DEC", AbsoluteX, increments::dec),
    0xDFu8 => illegal_op("DCP", AbsoluteX, illegal::dcp),

    // 0xE_
    0xE0u8 => op("CPX", Immediate, arithmetic::cpx),
    0xE1u8 => op("SBC", IndirectX, arithmetic::sbc),
    0xE2u8 => illegal_op("NOP", Immediate, system::nop),
    0xE3u8 => illegal_op("ISC", IndirectX, illegal::isc),
    0xE4u8 => op("CPX", ZeroPage, arithmetic::cpx),
    0xE5u8 => op("SBC", ZeroPage, arithmetic::sbc),
    0xE6u8 => op("INC", ZeroPage, increments::inc),
    0xE7u8 => illegal_op("ISC", ZeroPage, illegal::isc),
    0xE8u8 => op("INX", Implied, increments::inx),
    0xE9u8 => op("SBC", Immediate, arithmetic::sbc),
    0xEAu8 => op("NOP", Implied, system::nop),
    0xEBu8 => illegal_op("SBC", Immediate, arithmetic::sbc),
    0xECu8 => op("CPX", Absolute, arithmetic::cpx),
    0xEDu8 => op("SBC", Absolute, arithmetic::sbc),
    0xEEu8 => op("INC", Absolute, increments::inc),
    0xEFu8 => illegal_op("ISC", Absolute, illegal::isc),

    // 0xF_
    0xF0u8 => op("BEQ", Relative, branches::beq),
    0xF1u8 => op("SBC", IndirectY, arithmetic::sbc),
    0xF2u8 => illegal_op("JAM", Implied, system::jam),
    0xF3u8 => illegal_op("ISC", IndirectY, illegal::isc),
    0xF4u8 => illegal_op("NOP", ZeroPageX, system::nop),
    0xF5u8 => op("SBC", ZeroPageX, arithmetic::sbc),
    0xF6u8 => op("INC", ZeroPageX, increments::inc),
    0xF7u8 => illegal_op("ISC", ZeroPageX, illegal::isc),
    0xF8u8 => op("SED", Implied, flags_ops::sed),
    0xF9u8 => op("SBC", AbsoluteY, arithmetic::sbc),
    0xFAu8 => illegal_op("NOP", Implied, system::nop),
    0xFBu8 => illegal_op("ISC", AbsoluteY, illegal::isc),
    0xFCu8 => illegal_op("NOP", AbsoluteX, system::nop),
    0xFDu8 => op("SBC", AbsoluteX, arithmetic::sbc),
    0xFEu8 => op("INC", AbsoluteX, increments::inc),
    0xFFu8 => illegal_op("ISC", AbsoluteX, illegal::isc),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_value_is_mapped() {
        for opcode in 0u16..=255 {
            assert!(lookup(opcode as u8).is_some(), "opcode 0x{opcode:02X} is unmapped");
        }
    }

    #[test]
    fn documented_opcode_is_not_flagged_illegal() {
        assert!(!lookup(0xA9).unwrap().illegal); // LDA #imm
    }

    #[test]
    fn undocumented_opcode_is_flagged_illegal() {
        assert!(lookup(0xA3).unwrap().illegal); // LAX (ind,X)
    }

    #[test]
    fn sbc_alias_shares_the_documented_handler() {
        let documented = lookup(0xE9).unwrap();
        let alias = lookup(0xEB).unwrap();
        assert_eq!(documented.handler as usize, alias.handler as usize);
    }
}
