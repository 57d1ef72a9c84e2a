//! NES cartridge loading and mapper abstraction.
//!
//! This crate parses iNES v1 ROM images and exposes the [`Mapper`] trait
//! that translates CPU/PPU bus addresses into physical PRG/CHR offsets.
//! Only Mapper 0 (NROM) is implemented; any other mapper id in the header
//! is a load-time error.
//!
//! # Example
//!
//! ```no_run
//! use rustynes_mappers::{Rom, Nrom, Mapper};
//!
//! let rom_data = std::fs::read("game.nes").expect("failed to read ROM");
//! let rom = Rom::load(&rom_data).expect("failed to parse ROM");
//! let mapper = Nrom::new(&rom);
//!
//! let result = mapper.cpu_map_read(0x8000);
//! assert!(result.hit);
//! ```
//!
//! # no_std support
//!
//! This crate supports `no_std` environments with the `alloc` feature.
//! Disable the default `std` feature for embedded use.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod mapper;
pub mod mirroring;
pub mod rom;

mod cartridge;
mod nrom;

pub use cartridge::Cartridge;
pub use mapper::{MapResult, Mapper};
pub use mirroring::Mirroring;
pub use nrom::Nrom;
pub use rom::{Rom, RomError, RomHeader};

#[cfg(test)]
mod tests {
    use super::*;

    fn nrom_test_rom() -> Rom {
        Rom {
            header: RomHeader {
                prg_rom_size: 16_384,
                chr_rom_size: 8192,
                mapper_number: 0,
                mirroring: Mirroring::Horizontal,
                has_battery: false,
                has_trainer: false,
            },
            prg_rom: (0..16_384u32).map(|i| (i & 0xFF) as u8).collect(),
            chr_rom: (0..8192u32).map(|i| (i & 0xFF) as u8).collect(),
        }
    }

    #[test]
    fn nrom_round_trips_through_the_mapper_trait() {
        let rom = nrom_test_rom();
        let mapper = Nrom::new(&rom);
        assert_eq!(mapper.mapper_number(), 0);
        assert_eq!(mapper.mapper_name(), "NROM");
        let result = mapper.cpu_map_read(0x8000);
        assert!(result.hit);
        assert_eq!(rom.prg_rom[result.mapped as usize], 0);
    }
}
