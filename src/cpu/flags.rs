//! Packed processor-status word.

use bitflags::bitflags;

bitflags! {
    /// The six real 6502 status flags. Break and Unused are phantom bits, not
    /// stored here; they are synthesized when pushing to the stack and
    /// discarded (truncated) when pulled back.
    pub struct StatusFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

const BREAK_BIT: u8 = 0b0001_0000;
const UNUSED_BIT: u8 = 0b0010_0000;

impl StatusFlags {
    /// Flags set immediately after reset.
    pub fn reset_value() -> StatusFlags {
        StatusFlags::INTERRUPT_DISABLE
    }

    /// Update ZERO and NEGATIVE from a result byte, as almost every instruction does.
    pub fn set_zero_negative(&mut self, value: u8) {
        self.set(StatusFlags::ZERO, value == 0);
        self.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    /// Byte representation with the Break and Unused bits forced to 1, as used
    /// when pushing status to the stack from PHP or BRK.
    pub fn to_pushed_byte(self) -> u8 {
        self.bits() | BREAK_BIT | UNUSED_BIT
    }

    /// Rebuild flags from a byte pulled off the stack, discarding bits 4 and 5.
    pub fn from_pulled_byte(byte: u8) -> StatusFlags {
        StatusFlags::from_bits_truncate(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_value_sets_only_interrupt_disable() {
        assert_eq!(StatusFlags::reset_value(), StatusFlags::INTERRUPT_DISABLE);
    }

    #[test]
    fn pushed_byte_forces_break_and_unused_bits() {
        let flags = StatusFlags::CARRY;
        assert_eq!(flags.to_pushed_byte(), 0b0011_0001);
    }

    #[test]
    fn pulled_byte_discards_break_and_unused_bits() {
        let flags = StatusFlags::from_pulled_byte(0b1111_1111);
        assert_eq!(flags.bits(), 0b1100_1111);
    }

    #[test]
    fn set_zero_negative_tracks_value() {
        let mut flags = StatusFlags::empty();
        flags.set_zero_negative(0x00);
        assert!(flags.contains(StatusFlags::ZERO));
        assert!(!flags.contains(StatusFlags::NEGATIVE));

        flags.set_zero_negative(0x80);
        assert!(!flags.contains(StatusFlags::ZERO));
        assert!(flags.contains(StatusFlags::NEGATIVE));
    }
}
