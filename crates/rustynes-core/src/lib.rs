//! NES emulation core: integrates the CPU, PPU, and mapper/cartridge crates
//! behind a single [`NesCore`] handle.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                    NesCore                     │
//! │  ┌───────────────────────────────────────┐    │
//! │  │                 NesBus                 │    │
//! │  │  ┌─────┐   ┌─────┐   ┌───────────────┐ │    │
//! │  │  │ RAM │   │ PPU │   │   Cartridge   │ │    │
//! │  │  │ 2KB │   │     │   │ (ROM + mapper)│ │    │
//! │  │  └─────┘   └─────┘   └───────────────┘ │    │
//! │  └───────────────────▲─────────────────────┘    │
//! │                      │                          │
//! │                 ┌────┴────┐                     │
//! │                 │   Cpu   │                     │
//! │                 │  6502   │                     │
//! │                 └─────────┘                     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! This core has no APU and no controller input; the CPU bus's
//! `$4000..=$4017` range is a stub that reads 0 and ignores writes. The PPU
//! does not render backgrounds or sprites — its visible field is filled
//! with placeholder noise every clock, and [`rustynes_ppu::PatternTableImage`]
//! offers a read-only view of pattern-table VRAM for debugging.
//!
//! # Usage
//!
//! ```no_run
//! use rustynes_core::NesCore;
//!
//! let rom_data = std::fs::read("game.nes").expect("failed to read ROM");
//! let mut console = NesCore::with_rom(&rom_data).expect("failed to load cartridge");
//! console.reset();
//! console.step_ppu_frame();
//! let framebuffer = console.bus().ppu().framebuffer();
//! assert_eq!(framebuffer.len(), 256 * 240);
//! ```
//!
//! # Features
//!
//! - `std` (default): enable standard library support in the CPU/PPU/mapper
//!   crates this one depends on.
//! - `serde`: enable serialization support in those same crates.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod bus;
mod console;

pub use bus::NesBus;
pub use console::{ConsoleError, NesCore};

// Re-export the component types a host needs without depending on the
// lower-level crates directly.
pub use rustynes_cpu::{Bus, Cpu};
pub use rustynes_mappers::{Cartridge, Mirroring, RomError, RomHeader};
pub use rustynes_ppu::{Ppu, FRAME_HEIGHT, FRAME_WIDTH, MASTER_PALETTE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
