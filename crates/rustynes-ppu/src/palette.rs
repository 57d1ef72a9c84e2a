//! The fixed 2C02 master palette: 64 ARGB colors, opaque.
//!
//! Index `0x0D`/`0x0E`/`0x0F`, `0x1D`/`0x1E`/`0x1F`, `0x2E`/`0x2F`, and
//! `0x3E`/`0x3F` are the hardware's "black" entries and render as pure
//! black (the last two columns of rows 0 and 1, and the last column of
//! rows 2 and 3, in the canonical 16-column layout).

const fn argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// The 64-entry NES master palette, indexed by the 6-bit palette RAM value.
pub static MASTER_PALETTE: [u32; 64] = [
    argb(0x66, 0x66, 0x66), argb(0x00, 0x2A, 0x88), argb(0x14, 0x12, 0xA7), argb(0x3B, 0x00, 0xA4),
    argb(0x5C, 0x00, 0x7E), argb(0x6E, 0x00, 0x40), argb(0x6C, 0x06, 0x00), argb(0x56, 0x1D, 0x00),
    argb(0x33, 0x35, 0x00), argb(0x0B, 0x48, 0x00), argb(0x00, 0x52, 0x00), argb(0x00, 0x4F, 0x08),
    argb(0x00, 0x40, 0x4D), argb(0x00, 0x00, 0x00), argb(0x00, 0x00, 0x00), argb(0x00, 0x00, 0x00),
    argb(0xAD, 0xAD, 0xAD), argb(0x15, 0x5F, 0xD9), argb(0x42, 0x40, 0xFF), argb(0x75, 0x27, 0xFE),
    argb(0xA0, 0x1A, 0xCC), argb(0xB7, 0x1E, 0x7B), argb(0xB5, 0x31, 0x20), argb(0x99, 0x4E, 0x00),
    argb(0x6B, 0x6D, 0x00), argb(0x38, 0x87, 0x00), argb(0x0C, 0x93, 0x00), argb(0x00, 0x8F, 0x32),
    argb(0x00, 0x7C, 0x8D), argb(0x00, 0x00, 0x00), argb(0x00, 0x00, 0x00), argb(0x00, 0x00, 0x00),
    argb(0xFF, 0xFE, 0xFF), argb(0x64, 0xB0, 0xFF), argb(0x92, 0x90, 0xFF), argb(0xC6, 0x76, 0xFF),
    argb(0xF3, 0x6A, 0xFF), argb(0xFE, 0x6E, 0xCC), argb(0xFE, 0x81, 0x70), argb(0xEA, 0x9E, 0x22),
    argb(0xBC, 0xBE, 0x00), argb(0x88, 0xD8, 0x00), argb(0x5C, 0xE4, 0x30), argb(0x45, 0xE0, 0x82),
    argb(0x48, 0xCD, 0xDE), argb(0x4F, 0x4F, 0x4F), argb(0x00, 0x00, 0x00), argb(0x00, 0x00, 0x00),
    argb(0xFF, 0xFE, 0xFF), argb(0xC0, 0xDF, 0xFF), argb(0xD3, 0xD2, 0xFF), argb(0xE8, 0xC8, 0xFF),
    argb(0xFB, 0xC2, 0xFF), argb(0xFE, 0xC4, 0xEA), argb(0xFE, 0xCC, 0xC5), argb(0xF7, 0xD8, 0xA5),
    argb(0xE4, 0xE5, 0x94), argb(0xCF, 0xEF, 0x96), argb(0xBD, 0xF4, 0xAB), argb(0xB3, 0xF3, 0xCC),
    argb(0xB5, 0xEB, 0xF2), argb(0xB8, 0xB8, 0xB8), argb(0x00, 0x00, 0x00), argb(0x00, 0x00, 0x00),
];
