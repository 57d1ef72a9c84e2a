//! Pattern-table visualizer.
//!
//! Renders one of the PPU's two 4 KiB pattern tables as a 128×128 ARGB
//! image: 16×16 tiles of 8×8 2-bit-per-pixel data, each pixel resolved
//! through a caller-chosen 4-color palette slot.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// A rendered pattern table: 128×128 ARGB pixels, row-major.
#[derive(Debug, Clone)]
pub struct PatternTableImage {
    /// Image width in pixels (always 128).
    pub width: usize,
    /// Image height in pixels (always 128).
    pub height: usize,
    /// Row-major ARGB pixel data, `width * height` entries.
    pub pixels: Vec<u32>,
}

impl PatternTableImage {
    pub(crate) fn blank() -> Self {
        Self {
            width: 128,
            height: 128,
            pixels: vec![0xFF00_0000; 128 * 128],
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, y: usize, color: u32) {
        self.pixels[y * self.width + x] = color;
    }
}
