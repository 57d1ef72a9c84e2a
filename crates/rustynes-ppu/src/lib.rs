//! NES 2C02 PPU register and timing skeleton.
//!
//! This crate owns the PPU's CPU-visible register window (`$2000..$2007`),
//! its VRAM/pattern/palette storage, and the dot/scanline raster counter.
//! It does **not** implement background or sprite rendering: the visible
//! field is filled with palette noise every `clock()`, standing in for a
//! pixel pipeline that isn't built yet. The pattern-table visualizer in
//! [`pattern`] is a read-only debugging view over the same VRAM, independent
//! of the noise placeholder.
//!
//! # no_std support
//!
//! This crate supports `no_std` environments with the `alloc` feature.
//! Disable the default `std` feature for embedded use.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod bus;
mod ctrl;
mod mask;
mod palette;
mod pattern;
mod ppu;
mod status;

pub use bus::{NoCartridge, PpuBus};
pub use ctrl::Ctrl;
pub use mask::Mask;
pub use palette::MASTER_PALETTE;
pub use pattern::PatternTableImage;
pub use ppu::{
    DOTS_PER_SCANLINE, FRAME_HEIGHT, FRAME_WIDTH, PRE_RENDER_SCANLINE, Ppu, SCANLINES_PER_FRAME,
};
pub use status::Status;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_register_round_trip() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;

        ppu.cpu_write(0x2000, 0x80, &mut bus);
        ppu.cpu_write(0x2001, 0x1E, &mut bus);

        assert!(ppu.ctrl().nmi_enabled());
        assert!(ppu.mask().rendering_enabled());
    }

    #[test]
    fn integration_frame_completes_after_one_full_raster_sweep() {
        let mut ppu = Ppu::new();
        for _ in 0..(DOTS_PER_SCANLINE as u32 * SCANLINES_PER_FRAME as u32) {
            ppu.clock();
        }
        assert!(ppu.frame_complete);
    }
}
