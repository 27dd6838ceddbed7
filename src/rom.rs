//! iNES (v1.0) cartridge loading.

use bitflags::bitflags;

use crate::error::RomError;

const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_BANK_SIZE: usize = 8 * 1024;
const NES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A]; // "NES\x1A"

bitflags! {
    /// Control byte 1 of the iNES header (offset 6).
    pub struct ControlFlags1: u8 {
        /// 0 = horizontal mirroring, 1 = vertical mirroring.
        const VERTICAL_MIRRORING = 0x01;
        const HAS_PERSISTENT_MEMORY = 0x02;
        const HAS_TRAINER = 0x04;
        const FOUR_SCREEN_VRAM = 0x08;
        const MAPPER_LOW_NIBBLE = 0xF0;
    }
}

bitflags! {
    /// Control byte 2 of the iNES header (offset 7).
    pub struct ControlFlags2: u8 {
        const VS_UNISYSTEM = 0x01;
        const PLAYCHOICE_10 = 0x02;
        /// Bits 0-1 combined; must read zero for iNES revision 1.0.
        const INES_REVISION = 0x03;
        const MAPPER_HIGH_NIBBLE = 0xF0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// A parsed iNES cartridge image. Only mapper 0 (NROM) is supported.
#[derive(Debug, Clone)]
pub struct Rom {
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
    pub mapper: u8,
    pub mirroring: Mirroring,
    pub has_persistent_memory: bool,
}

impl Rom {
    /// Parse a complete iNES file image.
    pub fn parse(data: &[u8]) -> Result<Rom, RomError> {
        if data.len() < HEADER_SIZE {
            return Err(RomError::Truncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        if data[0..4] != NES_MAGIC {
            return Err(RomError::BadMagic);
        }

        let prg_banks = if data[4] == 0 { 1 } else { data[4] as usize };
        let chr_banks = data[5] as usize;

        let flags6 = ControlFlags1::from_bits_truncate(data[6]);
        let flags7 = ControlFlags2::from_bits_truncate(data[7]);

        if flags7.bits() & ControlFlags2::INES_REVISION.bits() != 0 {
            return Err(RomError::UnsupportedRevision);
        }

        let mapper = (flags7.bits() & ControlFlags2::MAPPER_HIGH_NIBBLE.bits())
            | (flags6.bits() >> 4);
        if mapper != 0 {
            return Err(RomError::UnsupportedMapper(mapper));
        }

        let mirroring = if flags6.contains(ControlFlags1::FOUR_SCREEN_VRAM) {
            Mirroring::FourScreen
        } else if flags6.contains(ControlFlags1::VERTICAL_MIRRORING) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mut offset = HEADER_SIZE;
        if flags6.contains(ControlFlags1::HAS_TRAINER) {
            offset += TRAINER_SIZE;
        }

        let prg_size = prg_banks * PRG_BANK_SIZE;
        let chr_size = chr_banks * CHR_BANK_SIZE;

        if data.len() < offset + prg_size {
            return Err(RomError::Truncated {
                expected: offset + prg_size,
                actual: data.len(),
            });
        }
        let prg_rom = data[offset..offset + prg_size].to_vec();
        offset += prg_size;

        let chr_rom = if chr_size == 0 {
            Vec::new()
        } else if data.len() < offset + chr_size {
            return Err(RomError::Truncated {
                expected: offset + chr_size,
                actual: data.len(),
            });
        } else {
            data[offset..offset + chr_size].to_vec()
        };

        Ok(Rom {
            prg_rom,
            chr_rom,
            mapper,
            mirroring,
            has_persistent_memory: flags6.contains(ControlFlags1::HAS_PERSISTENT_MEMORY),
        })
    }

    /// A minimal one-bank NROM cartridge filled with NOPs, for tests.
    pub fn test_rom() -> Rom {
        Rom {
            prg_rom: vec![0xEA; PRG_BANK_SIZE],
            chr_rom: vec![0; CHR_BANK_SIZE],
            mapper: 0,
            mirroring: Mirroring::Horizontal,
            has_persistent_memory: false,
        }
    }

    /// `test_rom()` with the reset and IRQ/BRK vectors baked into the image
    /// at `0xFFFC/0xFFFD` and `0xFFFE/0xFFFF`. PRG-ROM is read-only once
    /// mapped onto the bus, so tests that need the CPU to start or vector
    /// somewhere specific must set these up front rather than writing them
    /// through the bus after the fact.
    pub fn test_rom_with_vectors(reset_vector: u16, irq_brk_vector: u16) -> Rom {
        let mut rom = Rom::test_rom();
        let len = rom.prg_rom.len();
        let [reset_lo, reset_hi] = reset_vector.to_le_bytes();
        let [irq_lo, irq_hi] = irq_brk_vector.to_le_bytes();
        rom.prg_rom[len - 4] = reset_lo;
        rom.prg_rom[len - 3] = reset_hi;
        rom.prg_rom[len - 2] = irq_lo;
        rom.prg_rom[len - 1] = irq_hi;
        rom
    }

    /// `test_rom()` with `bytes` written starting at PRG-ROM CPU address
    /// `addr` (`0x8000..=0xFFFF`). PRG-ROM writes through the bus are
    /// no-ops on real hardware, so tests that need an actual instruction
    /// sequence at a ROM address (rather than in writable RAM) must bake it
    /// into the image up front.
    pub fn test_rom_with_program(addr: u16, bytes: &[u8]) -> Rom {
        let mut rom = Rom::test_rom();
        let mask = (rom.prg_rom.len() - 1) as u16;
        let base = addr.wrapping_sub(0x8000) & mask;
        for (i, &byte) in bytes.iter().enumerate() {
            let offset = (base as usize + i) % rom.prg_rom.len();
            rom.prg_rom[offset] = byte;
        }
        rom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut h = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, chr_banks, flags6, flags7];
        h.resize(HEADER_SIZE, 0);
        h
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = header(1, 1, 0, 0);
        data[0] = 0x00;
        data.extend(vec![0; PRG_BANK_SIZE + CHR_BANK_SIZE]);
        assert_eq!(Rom::parse(&data), Err(RomError::BadMagic));
    }

    #[test]
    fn rejects_unsupported_mapper() {
        let mut data = header(1, 1, 0x10, 0x00);
        data.extend(vec![0; PRG_BANK_SIZE + CHR_BANK_SIZE]);
        assert_eq!(Rom::parse(&data), Err(RomError::UnsupportedMapper(1)));
    }

    #[test]
    fn rejects_revision_with_either_low_bit_of_byte7_set() {
        let mut data = header(1, 1, 0, 0x01); // VS Unisystem bit set
        data.extend(vec![0; PRG_BANK_SIZE + CHR_BANK_SIZE]);
        assert_eq!(Rom::parse(&data), Err(RomError::UnsupportedRevision));

        let mut data = header(1, 1, 0, 0x02); // PlayChoice-10 bit set
        data.extend(vec![0; PRG_BANK_SIZE + CHR_BANK_SIZE]);
        assert_eq!(Rom::parse(&data), Err(RomError::UnsupportedRevision));
    }

    #[test]
    fn accepts_revision_with_only_mapper_high_nibble_bits_set() {
        // byte7 = 0x0C: bits 2-3 set, bits 0-1 clear. Valid v1.0 iNES per the
        // spec's literal "low two bits zero" rule, even though 0x0C was once
        // mistaken for the revision mask itself.
        let mut data = header(1, 1, 0, 0x0C);
        data.extend(vec![0; PRG_BANK_SIZE + CHR_BANK_SIZE]);
        assert!(Rom::parse(&data).is_ok());
    }

    #[test]
    fn parses_one_bank_nrom() {
        let mut data = header(1, 1, 0, 0);
        data.extend(vec![0xAB; PRG_BANK_SIZE]);
        data.extend(vec![0xCD; CHR_BANK_SIZE]);
        let rom = Rom::parse(&data).expect("should parse");
        assert_eq!(rom.prg_rom.len(), PRG_BANK_SIZE);
        assert_eq!(rom.chr_rom.len(), CHR_BANK_SIZE);
        assert_eq!(rom.mapper, 0);
        assert_eq!(rom.mirroring, Mirroring::Horizontal);
    }

    #[test]
    fn vertical_mirroring_bit_is_read() {
        let mut data = header(1, 1, 0x01, 0x00);
        data.extend(vec![0; PRG_BANK_SIZE + CHR_BANK_SIZE]);
        let rom = Rom::parse(&data).expect("should parse");
        assert_eq!(rom.mirroring, Mirroring::Vertical);
    }

    #[test]
    fn rejects_truncated_prg() {
        let mut data = header(2, 0, 0, 0);
        data.extend(vec![0; PRG_BANK_SIZE]); // only one of two declared banks present
        assert!(matches!(Rom::parse(&data), Err(RomError::Truncated { .. })));
    }

    #[test]
    fn trainer_offsets_prg_start() {
        let mut data = header(1, 0, 0x04, 0x00);
        data.extend(vec![0x11; TRAINER_SIZE]);
        data.extend(vec![0x22; PRG_BANK_SIZE]);
        let rom = Rom::parse(&data).expect("should parse");
        assert!(rom.prg_rom.iter().all(|&b| b == 0x22));
    }
}
