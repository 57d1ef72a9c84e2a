//! iNES v1 ROM file format parsing.
//!
//! NES 2.0 is not recognized; a header whose flags 7 byte signals NES 2.0
//! is still parsed as plain iNES v1 (its extra fields are ignored), which
//! matches how most NROM-only images in the wild are packaged.

use crate::Mirroring;

/// Errors that can occur when constructing a cartridge.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RomError {
    /// Header magic did not match `"NES\x1A"`, or the file was too short
    /// to contain a full header.
    #[error("invalid iNES header")]
    InvalidFormat,

    /// The header's mapper id is not `0`.
    #[error("unsupported mapper: {0}")]
    UnsupportedMapper(u16),

    /// The file was truncated relative to what its header promised.
    #[error("ROM data truncated: expected at least {expected} bytes, got {actual}")]
    IoError {
        /// Bytes the header's PRG/CHR counts require.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },
}

/// Parsed iNES v1 header (16 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomHeader {
    /// PRG-ROM size in bytes (chunks of 16 KiB).
    pub prg_rom_size: usize,
    /// CHR-ROM size in bytes (chunks of 8 KiB; 0 means CHR-RAM).
    pub chr_rom_size: usize,
    /// iNES mapper number, assembled from the flags 6/7 nibbles.
    pub mapper_number: u16,
    /// Nametable mirroring declared by flags 6.
    pub mirroring: Mirroring,
    /// Battery-backed PRG-RAM present (flags 6 bit 1).
    pub has_battery: bool,
    /// 512-byte trainer present before PRG-ROM (flags 6 bit 2).
    pub has_trainer: bool,
}

impl RomHeader {
    const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

    /// Parse a 16-byte iNES header.
    ///
    /// # Errors
    ///
    /// Returns [`RomError::InvalidFormat`] if fewer than 16 bytes are
    /// supplied or the magic number doesn't match.
    pub fn parse(data: &[u8]) -> Result<Self, RomError> {
        if data.len() < 16 || data[0..4] != Self::MAGIC {
            return Err(RomError::InvalidFormat);
        }

        let prg_rom_size = usize::from(data[4]) * 16_384;
        let chr_rom_size = usize::from(data[5]) * 8192;
        let flags6 = data[6];
        let flags7 = data[7];
        let mapper_number = u16::from((flags7 & 0xF0) | (flags6 >> 4));

        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(Self {
            prg_rom_size,
            chr_rom_size,
            mapper_number,
            mirroring,
            has_battery: flags6 & 0x02 != 0,
            has_trainer: flags6 & 0x04 != 0,
        })
    }
}

/// A parsed NES ROM image: header plus PRG/CHR byte arrays.
#[derive(Debug, Clone)]
pub struct Rom {
    /// Parsed header.
    pub header: RomHeader,
    /// Program ROM bytes.
    pub prg_rom: Vec<u8>,
    /// Character ROM bytes (empty when the cartridge uses CHR-RAM).
    pub chr_rom: Vec<u8>,
}

impl Rom {
    /// Load and validate a ROM image per the iNES v1 loader algorithm:
    /// parse the header, skip an optional trainer, slice out PRG and CHR,
    /// and reject anything but Mapper 0.
    ///
    /// # Errors
    ///
    /// Returns [`RomError::InvalidFormat`] for a bad header,
    /// [`RomError::UnsupportedMapper`] for any mapper id other than 0, and
    /// [`RomError::IoError`] if the file is shorter than the header
    /// promises.
    pub fn load(data: &[u8]) -> Result<Self, RomError> {
        let header = RomHeader::parse(data)?;

        if header.mapper_number != 0 {
            return Err(RomError::UnsupportedMapper(header.mapper_number));
        }

        let mut offset = 16;
        if header.has_trainer {
            offset += 512;
        }

        let prg_end = offset + header.prg_rom_size;
        let chr_end = prg_end + header.chr_rom_size;
        if data.len() < chr_end {
            return Err(RomError::IoError {
                expected: chr_end,
                actual: data.len(),
            });
        }

        let prg_rom = data[offset..prg_end].to_vec();
        let chr_rom = data[prg_end..chr_end].to_vec();

        log::debug!(
            "cartridge: loaded NROM image, prg={} bytes chr={} bytes mirroring={:?}",
            prg_rom.len(),
            chr_rom.len(),
            header.mirroring
        );

        Ok(Self {
            header,
            prg_rom,
            chr_rom,
        })
    }
}
