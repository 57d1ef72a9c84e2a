//! Cartridge: a loaded ROM bound to its mapper, and the single entry point
//! the bus uses to reach both.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::mapper::Mapper;
use crate::nrom::Nrom;
use crate::rom::{Rom, RomError};
use crate::Mirroring;

/// A loaded cartridge: the parsed ROM image plus the mapper that
/// interprets it. Constructing one from ROM bytes is the only way a
/// caller reaches PRG/CHR data or a mapper instance — bus code never
/// touches `Rom`/`Mapper` directly.
pub struct Cartridge {
    rom: Rom,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Parse `data` as an iNES v1 image and bind it to its declared mapper.
    ///
    /// # Errors
    ///
    /// Propagates [`RomError`] from [`Rom::load`], plus
    /// [`RomError::UnsupportedMapper`] for any id other than 0 (NROM is the
    /// only mapper this crate implements today).
    pub fn load(data: &[u8]) -> Result<Self, RomError> {
        let rom = Rom::load(data)?;
        let mapper = Nrom::new(&rom);
        Ok(Self {
            rom,
            mapper: Box::new(mapper),
        })
    }

    /// Read a CPU-bus address (`0x8000..=0xFFFF` on NROM). Returns `None`
    /// if the cartridge doesn't claim this address.
    #[must_use]
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        let result = self.mapper.cpu_map_read(addr);
        result.hit.then(|| self.rom.prg_rom[result.mapped as usize])
    }

    /// Write a CPU-bus address. Returns whether the cartridge claimed it.
    /// NROM's PRG is read-only, so a mapper hit on the write channel only
    /// ever occurs for mappers with bank-select registers; NROM always
    /// misses here and the write is a no-op, retained for mappers that
    /// bank-switch via writes into the PRG window.
    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        let result = self.mapper.cpu_map_write(addr);
        if result.hit && (result.mapped as usize) < self.rom.prg_rom.len() {
            self.rom.prg_rom[result.mapped as usize] = data;
        }
        result.hit
    }

    /// Read a PPU-bus address (`0x0000..=0x1FFF`, the pattern tables).
    /// Returns `None` if the cartridge doesn't claim this address.
    #[must_use]
    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        let result = self.mapper.ppu_map_read(addr);
        if !result.hit {
            return None;
        }
        if self.rom.chr_rom.is_empty() {
            Some(0)
        } else {
            Some(self.rom.chr_rom[result.mapped as usize % self.rom.chr_rom.len()])
        }
    }

    /// Write a PPU-bus address. Returns whether the cartridge claimed it.
    /// Always `false` against CHR-ROM; reserved for CHR-RAM cartridges,
    /// which this crate does not yet model.
    pub fn ppu_write(&mut self, addr: u16, _data: u8) -> bool {
        self.mapper.ppu_map_write(addr).hit
    }

    /// Nametable mirroring declared by the cartridge header.
    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }

    /// The parsed ROM header, for diagnostics.
    #[must_use]
    pub fn header(&self) -> &crate::rom::RomHeader {
        &self.rom.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rom_bytes() -> Vec<u8> {
        let mut bytes = vec![0x4E, 0x45, 0x53, 0x1A, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        bytes.extend((0..16_384u32).map(|i| (i & 0xFF) as u8));
        bytes.extend((0..8192u32).map(|i| (i & 0xFF) as u8));
        bytes
    }

    #[test]
    fn loads_and_reads_through_the_mapper() {
        let cart = Cartridge::load(&test_rom_bytes()).unwrap();
        assert_eq!(cart.cpu_read(0x8000), Some(0));
        assert_eq!(cart.cpu_read(0x4020), None);
        assert!(cart.ppu_read(0x0000).is_some());
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
    }

    #[test]
    fn rejects_bad_data() {
        assert!(Cartridge::load(&[0, 0, 0, 0]).is_err());
    }
}
