//! The 2C02 picture processing unit: register window, address latch, dot
//! and scanline counters, and a noise-placeholder framebuffer.
//!
//! This is deliberately not a rendering engine. Background and sprite
//! fetch/shift pipelines are out of scope; `clock()` advances the raster
//! position and fills the visible field with palette noise, which is
//! exactly what a disconnected background pipeline would leave behind.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::bus::PpuBus;
use crate::ctrl::Ctrl;
use crate::mask::Mask;
use crate::palette::MASTER_PALETTE;
use crate::pattern::PatternTableImage;
use crate::status::Status;

/// Framebuffer width in pixels.
pub const FRAME_WIDTH: usize = 256;
/// Framebuffer height in pixels.
pub const FRAME_HEIGHT: usize = 240;
/// Dots per scanline, including the non-visible overscan region.
pub const DOTS_PER_SCANLINE: u16 = 341;
/// Scanlines per frame, including vertical blank and the pre-render line.
pub const SCANLINES_PER_FRAME: u16 = 262;
/// The scanline at which the raster wraps back to the top of the frame.
pub const PRE_RENDER_SCANLINE: u16 = 261;

const NAMETABLE_SIZE: usize = 1024;
const PATTERN_TABLE_SIZE: usize = 4096;
const PALETTE_SIZE: usize = 32;

/// The PPU's CPU-visible register window plus internal raster/memory state.
pub struct Ppu {
    nametable: [[u8; NAMETABLE_SIZE]; 2],
    pattern: [[u8; PATTERN_TABLE_SIZE]; 2],
    palette: [u8; PALETTE_SIZE],

    ctrl: Ctrl,
    mask: Mask,
    status: Status,
    oam_addr: u8,
    oam_data: u8,
    scroll: u8,

    address_latch: bool,
    ppu_addr_reg: u16,
    data_buffer: u8,

    dot: u16,
    scanline: u16,
    /// Set true the instant a frame completes; the caller is responsible
    /// for clearing it before the next `step_ppu_frame` round.
    pub frame_complete: bool,

    framebuffer: Vec<u32>,
    rng: SmallRng,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    /// Construct a freshly powered-on PPU: all registers and memories
    /// zeroed, raster at dot 0 / scanline 0, framebuffer black.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nametable: [[0; NAMETABLE_SIZE]; 2],
            pattern: [[0; PATTERN_TABLE_SIZE]; 2],
            palette: [0; PALETTE_SIZE],
            ctrl: Ctrl::empty(),
            mask: Mask::empty(),
            status: Status::empty(),
            oam_addr: 0,
            oam_data: 0,
            scroll: 0,
            address_latch: false,
            ppu_addr_reg: 0,
            data_buffer: 0,
            dot: 0,
            scanline: 0,
            frame_complete: false,
            framebuffer: vec![0xFF00_0000; FRAME_WIDTH * FRAME_HEIGHT],
            rng: SmallRng::seed_from_u64(0xA5A5_5A5A_1234_5678),
        }
    }

    /// Reset to power-on state, preserving no prior register contents.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The rendered framebuffer, `FRAME_WIDTH * FRAME_HEIGHT` ARGB pixels.
    #[must_use]
    pub fn framebuffer(&self) -> &[u32] {
        &self.framebuffer
    }

    /// Current control register, for diagnostics.
    #[must_use]
    pub const fn ctrl(&self) -> Ctrl {
        self.ctrl
    }

    /// Current mask register, for diagnostics.
    #[must_use]
    pub const fn mask(&self) -> Mask {
        self.mask
    }

    /// Last byte written to `$2005`, accepted but not interpreted in this
    /// scope (no scroll register model).
    #[must_use]
    pub const fn scroll(&self) -> u8 {
        self.scroll
    }

    /// Current OAM address pointer (`$2003`). Sprite RAM itself is not
    /// implemented in this scope.
    #[must_use]
    pub const fn oam_addr(&self) -> u8 {
        self.oam_addr
    }

    /// Last byte written to `$2004`. Sprite RAM is not implemented in this
    /// scope, so `$2004` reads always return 0 regardless of this value.
    #[must_use]
    pub const fn oam_data(&self) -> u8 {
        self.oam_data
    }

    /// Current raster position, for diagnostics.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.dot, self.scanline)
    }

    /// CPU-bus read of the 8-register window. `addr` is masked to
    /// `addr & 0x0007` by the caller (the bus decoder); this method also
    /// masks defensively so tests can call it with raw `0x2000..=0x3FFF`
    /// addresses.
    pub fn cpu_read(&mut self, addr: u16, bus: &mut impl PpuBus) -> u8 {
        match addr & 0x0007 {
            2 => {
                let value = self.status.read_with_open_bus(self.data_buffer);
                self.status.set_vblank(false);
                self.address_latch = false;
                value
            }
            4 => 0,
            7 => {
                let value = if self.ppu_addr_reg >= 0x3F00 {
                    self.ppu_read(self.ppu_addr_reg, bus)
                } else {
                    let buffered = self.data_buffer;
                    self.data_buffer = self.ppu_read(self.ppu_addr_reg, bus);
                    buffered
                };
                self.ppu_addr_reg = self.ppu_addr_reg.wrapping_add(self.ctrl.vram_increment());
                value
            }
            _ => 0,
        }
    }

    /// CPU-bus write of the 8-register window. See [`Self::cpu_read`] for
    /// the masking note.
    pub fn cpu_write(&mut self, addr: u16, data: u8, bus: &mut impl PpuBus) {
        match addr & 0x0007 {
            0 => self.ctrl = Ctrl::from_bits_truncate(data),
            1 => self.mask = Mask::from_bits_truncate(data),
            3 => self.oam_addr = data,
            4 => self.oam_data = data,
            5 => self.scroll = data,
            6 => {
                if self.address_latch {
                    self.ppu_addr_reg = (self.ppu_addr_reg & 0xFF00) | u16::from(data);
                    self.address_latch = false;
                } else {
                    self.ppu_addr_reg =
                        (u16::from(data & 0x3F) << 8) | (self.ppu_addr_reg & 0x00FF);
                    self.address_latch = true;
                }
            }
            7 => {
                self.ppu_write(self.ppu_addr_reg, data, bus);
                self.ppu_addr_reg = self.ppu_addr_reg.wrapping_add(self.ctrl.vram_increment());
            }
            _ => {}
        }
    }

    /// Internal PPU address-space read: cartridge pattern tables, nametable
    /// RAM, or palette RAM.
    pub fn ppu_read(&self, addr: u16, bus: &mut impl PpuBus) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => bus.cart_ppu_read(addr).unwrap_or_else(|| {
                self.pattern[usize::from((addr >> 12) & 1)][usize::from(addr & 0x0FFF)]
            }),
            0x2000..=0x3EFF => {
                let bank = usize::from((addr >> 10) & 1);
                self.nametable[bank][usize::from(addr & 0x03FF)]
            }
            _ => self.palette[Self::palette_index(addr)],
        }
    }

    /// Internal PPU address-space write. Mirrors [`Self::ppu_read`]'s
    /// decode; a cartridge write hit (CHR-RAM) takes priority over the
    /// pattern shadow.
    pub fn ppu_write(&mut self, addr: u16, data: u8, bus: &mut impl PpuBus) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => {
                if !bus.cart_ppu_write(addr, data) {
                    self.pattern[usize::from((addr >> 12) & 1)][usize::from(addr & 0x0FFF)] = data;
                }
            }
            0x2000..=0x3EFF => {
                let bank = usize::from((addr >> 10) & 1);
                self.nametable[bank][usize::from(addr & 0x03FF)] = data;
            }
            _ => {
                let index = Self::palette_index(addr);
                self.palette[index] = data;
            }
        }
    }

    fn palette_index(addr: u16) -> usize {
        let mut index = usize::from(addr & 0x1F);
        if matches!(index, 0x10 | 0x14 | 0x18 | 0x1C) {
            index -= 0x10;
        }
        index
    }

    /// Advance the raster by one dot. Fills the visible window with
    /// palette noise (indices `0x3F`/`0x30`), then wraps `dot` at 341 and
    /// `scanline` at the pre-render line, raising `frame_complete`.
    pub fn clock(&mut self) {
        if self.scanline < FRAME_HEIGHT as u16 && self.dot >= 1 && self.dot <= FRAME_WIDTH as u16 {
            let index = if self.rng.gen_bool(0.5) { 0x3F } else { 0x30 };
            let color = MASTER_PALETTE[(index & 0x3F) as usize];
            let x = usize::from(self.dot - 1);
            let y = usize::from(self.scanline);
            self.framebuffer[y * FRAME_WIDTH + x] = color;
        }

        self.dot += 1;
        if self.dot == DOTS_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
        }
        if self.scanline == PRE_RENDER_SCANLINE {
            self.scanline = 0;
            self.frame_complete = true;
            log::debug!("ppu: frame complete");
        }
    }

    /// Render one of the two 4 KiB pattern tables as a 128x128 image,
    /// resolving each 2-bit pixel through palette slot `palette_index`
    /// (0..=7, the four background plus four sprite palettes).
    pub fn get_pattern_table(
        &self,
        which: u8,
        palette_index: u8,
        bus: &mut impl PpuBus,
    ) -> PatternTableImage {
        let mut image = PatternTableImage::blank();
        let which = u16::from(which & 1);

        for tile_y in 0..16u16 {
            for tile_x in 0..16u16 {
                let tile_offset = tile_y * 256 + tile_x * 16;
                for row in 0..8u16 {
                    let lsb_addr = which * 0x1000 + tile_offset + row;
                    let msb_addr = lsb_addr + 8;
                    let mut lsb = self.ppu_read(lsb_addr, bus);
                    let mut msb = self.ppu_read(msb_addr, bus);

                    for col in 0..8u16 {
                        let pixel = ((msb & 0x01) << 1) | (lsb & 0x01);
                        lsb >>= 1;
                        msb >>= 1;

                        let palette_addr =
                            0x3F00 + ((u16::from(palette_index) << 2) + u16::from(pixel)) % 0x20;
                        let color_index = self.ppu_read(palette_addr, bus) & 0x3F;
                        let color = MASTER_PALETTE[usize::from(color_index)];

                        let x = usize::from(tile_x * 8 + (7 - col));
                        let y = usize::from(tile_y * 8 + row);
                        image.set(x, y, color);
                    }
                }
            }
        }

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::NoCartridge;

    #[test]
    fn oam_data_read_is_always_zero() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.cpu_write(0x2004, 0x99, &mut bus);
        assert_eq!(ppu.oam_data(), 0x99);
        assert_eq!(ppu.cpu_read(0x2004, &mut bus), 0);
    }

    #[test]
    fn status_read_clears_vblank_and_latch() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.status.set_vblank(true);
        ppu.address_latch = true;
        let value = ppu.cpu_read(0x2002, &mut bus);
        assert_eq!(value & 0x80, 0x80);
        assert!(!ppu.status.in_vblank());
        assert!(!ppu.address_latch);
    }

    #[test]
    fn addr_register_two_phase_write() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.cpu_write(0x2006, 0x3F, &mut bus);
        assert!(ppu.address_latch);
        ppu.cpu_write(0x2006, 0x00, &mut bus);
        assert!(!ppu.address_latch);
        assert_eq!(ppu.ppu_addr_reg, 0x3F00);
    }

    #[test]
    fn addr_register_high_byte_masked_to_six_bits() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.cpu_write(0x2006, 0xFF, &mut bus);
        ppu.cpu_write(0x2006, 0x00, &mut bus);
        assert_eq!(ppu.ppu_addr_reg, 0x3F00);
    }

    #[test]
    fn data_port_read_is_buffered_except_in_palette_region() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.pattern[0][0x0010] = 0x42;

        ppu.cpu_write(0x2006, 0x00, &mut bus);
        ppu.cpu_write(0x2006, 0x10, &mut bus);
        let first = ppu.cpu_read(0x2007, &mut bus);
        assert_eq!(first, 0);
        let second = ppu.cpu_read(0x2007, &mut bus);
        assert_eq!(second, 0x42);

        ppu.cpu_write(0x2006, 0x3F, &mut bus);
        ppu.cpu_write(0x2006, 0x00, &mut bus);
        ppu.palette[0] = 0x20;
        let fresh = ppu.cpu_read(0x2007, &mut bus);
        assert_eq!(fresh, 0x20);
    }

    #[test]
    fn data_port_advances_address_by_one() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.cpu_write(0x2006, 0x20, &mut bus);
        ppu.cpu_write(0x2006, 0x00, &mut bus);
        ppu.cpu_write(0x2007, 0xAB, &mut bus);
        assert_eq!(ppu.ppu_addr_reg, 0x2001);
    }

    #[test]
    fn palette_mirrors_background_color_slots() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.ppu_write(0x3F10, 0x11, &mut bus);
        assert_eq!(ppu.ppu_read(0x3F00, &mut bus), 0x11);
        ppu.ppu_write(0x3F14, 0x12, &mut bus);
        assert_eq!(ppu.ppu_read(0x3F04, &mut bus), 0x12);
        ppu.ppu_write(0x3F18, 0x13, &mut bus);
        assert_eq!(ppu.ppu_read(0x3F08, &mut bus), 0x13);
        ppu.ppu_write(0x3F1C, 0x14, &mut bus);
        assert_eq!(ppu.ppu_read(0x3F0C, &mut bus), 0x14);
    }

    #[test]
    fn pattern_shadow_used_when_no_cartridge_claims_the_address() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.ppu_write(0x0005, 0x99, &mut bus);
        assert_eq!(ppu.ppu_read(0x0005, &mut bus), 0x99);
    }

    #[test]
    fn clock_wraps_dot_and_scanline() {
        let mut ppu = Ppu::new();
        for _ in 0..DOTS_PER_SCANLINE {
            ppu.clock();
        }
        assert_eq!(ppu.dot, 0);
        assert_eq!(ppu.scanline, 1);
        assert!(!ppu.frame_complete);
    }

    #[test]
    fn clock_raises_frame_complete_at_pre_render_line() {
        let mut ppu = Ppu::new();
        for _ in 0..(u32::from(DOTS_PER_SCANLINE) * u32::from(PRE_RENDER_SCANLINE)) {
            ppu.clock();
        }
        assert_eq!(ppu.scanline, 0);
        assert!(ppu.frame_complete);
    }

    #[test]
    fn register_mirroring_every_eight_bytes() {
        let mut ppu = Ppu::new();
        let mut bus = NoCartridge;
        ppu.status.set_sprite_zero_hit(true);
        let a = ppu.cpu_read(0x2002, &mut bus);
        let mut ppu2 = Ppu::new();
        ppu2.status.set_sprite_zero_hit(true);
        let b = ppu2.cpu_read(0x2008 + 2, &mut bus);
        assert_eq!(a, b);
    }

    #[test]
    fn pattern_table_image_is_128_square() {
        let ppu = Ppu::new();
        let mut bus = NoCartridge;
        let image = ppu.get_pattern_table(0, 0, &mut bus);
        assert_eq!(image.width, 128);
        assert_eq!(image.height, 128);
        assert_eq!(image.pixels.len(), 128 * 128);
    }
}
