//! 6502 addressing modes.
//!
//! Each mode describes how an instruction resolves its operand from the
//! bytes following the opcode. The mode is looked up per-opcode in
//! [`crate::opcode::OPCODE_TABLE`] rather than carried as a free-standing
//! table, since every opcode slot already needs a mode tag alongside its
//! mnemonic and cycle count.

/// Addressing modes for 6502 instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddrMode {
    /// Implicit — no operand, the instruction knows its target.
    /// Example: CLC, SEC, INX.
    Imp,
    /// Accumulator — operates on `a` directly.
    /// Example: ASL A, ROL A.
    Acc,
    /// Immediate — the operand is the byte following the opcode.
    /// Example: LDA #$42.
    Imm,
    /// Zero page — 8-bit address in `$0000..=$00FF`.
    /// Example: LDA $42.
    Zp0,
    /// Zero page,X — zero-page address plus X, wrapping within the page.
    /// Example: LDA $42,X.
    Zpx,
    /// Zero page,Y — zero-page address plus Y, wrapping within the page.
    /// Example: LDX $42,Y.
    Zpy,
    /// Relative — signed 8-bit branch offset.
    /// Example: BEQ label.
    Rel,
    /// Absolute — full 16-bit address.
    /// Example: LDA $1234.
    Abs,
    /// Absolute,X — 16-bit address plus X; may add a page-cross cycle.
    /// Example: LDA $1234,X.
    Abx,
    /// Absolute,Y — 16-bit address plus Y; may add a page-cross cycle.
    /// Example: LDA $1234,Y.
    Aby,
    /// Indirect — 16-bit pointer to a 16-bit target, used only by JMP.
    /// Reproduces the NMOS page-wrap bug when the pointer's low byte is
    /// `$FF`.
    /// Example: JMP ($1234).
    Ind,
    /// Indexed indirect, `($zp,X)` — pointer in zero page indexed by X
    /// before the indirection.
    /// Example: LDA ($42,X).
    Izx,
    /// Indirect indexed, `($zp),Y` — pointer in zero page, indexed by Y
    /// after the indirection; may add a page-cross cycle.
    /// Example: LDA ($42),Y.
    Izy,
}

impl AddrMode {
    /// Number of operand bytes following the opcode, not counting the
    /// opcode byte itself.
    #[must_use]
    pub const fn operand_size(self) -> u8 {
        match self {
            Self::Imp | Self::Acc => 0,
            Self::Imm | Self::Zp0 | Self::Zpx | Self::Zpy | Self::Rel | Self::Izx | Self::Izy => {
                1
            }
            Self::Abs | Self::Abx | Self::Aby | Self::Ind => 2,
        }
    }

    /// Whether this mode can ever add a page-cross cycle. Combined with
    /// the opcode's own page-cross sensitivity before the extra cycle is
    /// actually charged.
    #[must_use]
    pub const fn page_cross_candidate(self) -> bool {
        matches!(self, Self::Abx | Self::Aby | Self::Izy)
    }
}
