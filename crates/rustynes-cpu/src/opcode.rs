//! The 256-entry opcode dispatch table.
//!
//! Every byte value decodes to an [`OpInfo`]: the operation, its addressing
//! mode, a base cycle count, and whether the operation itself is sensitive
//! to a page-crossing effective address (the addressing mode side of that
//! sensitivity lives in [`crate::addressing::AddrMode::page_cross_candidate`]).
//! Bytes that do not correspond to one of the 56 official mnemonics decode
//! as [`Op::Nop`] with two cycles, rather than reproducing any of the
//! documented unofficial opcodes.

use crate::addressing::AddrMode;

/// The 56 official 6502 mnemonics, plus NOP standing in for every
/// undocumented opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Op {
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS, CLC,
    CLD, CLI, CLV, CMP, CPX, CPY, DEC, DEX, DEY, EOR, INC, INX, INY, JMP,
    JSR, LDA, LDX, LDY, LSR, NOP, ORA, PHA, PHP, PLA, PLP, ROL, ROR, RTI,
    RTS, SBC, SEC, SED, SEI, STA, STX, STY, TAX, TAY, TSX, TXA, TXS, TYA,
}

impl Op {
    /// Mnemonic text, for the disassembler.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::ADC => "ADC", Self::AND => "AND", Self::ASL => "ASL",
            Self::BCC => "BCC", Self::BCS => "BCS", Self::BEQ => "BEQ",
            Self::BIT => "BIT", Self::BMI => "BMI", Self::BNE => "BNE",
            Self::BPL => "BPL", Self::BRK => "BRK", Self::BVC => "BVC",
            Self::BVS => "BVS", Self::CLC => "CLC", Self::CLD => "CLD",
            Self::CLI => "CLI", Self::CLV => "CLV", Self::CMP => "CMP",
            Self::CPX => "CPX", Self::CPY => "CPY", Self::DEC => "DEC",
            Self::DEX => "DEX", Self::DEY => "DEY", Self::EOR => "EOR",
            Self::INC => "INC", Self::INX => "INX", Self::INY => "INY",
            Self::JMP => "JMP", Self::JSR => "JSR", Self::LDA => "LDA",
            Self::LDX => "LDX", Self::LDY => "LDY", Self::LSR => "LSR",
            Self::NOP => "NOP", Self::ORA => "ORA", Self::PHA => "PHA",
            Self::PHP => "PHP", Self::PLA => "PLA", Self::PLP => "PLP",
            Self::ROL => "ROL", Self::ROR => "ROR", Self::RTI => "RTI",
            Self::RTS => "RTS", Self::SBC => "SBC", Self::SEC => "SEC",
            Self::SED => "SED", Self::SEI => "SEI", Self::STA => "STA",
            Self::STX => "STX", Self::STY => "STY", Self::TAX => "TAX",
            Self::TAY => "TAY", Self::TSX => "TSX", Self::TXA => "TXA",
            Self::TXS => "TXS", Self::TYA => "TYA",
        }
    }

    /// Whether this operation adds a page-cross cycle when its addressing
    /// mode also flags the access as page-cross candidate. Covers the
    /// read-modify instructions; stores and read-modify-write memory ops
    /// always pay the indexed-addressing cost up front on real hardware,
    /// so they are not flagged sensitive here.
    const fn is_page_cross_sensitive(self) -> bool {
        matches!(
            self,
            Self::ADC
                | Self::AND
                | Self::CMP
                | Self::EOR
                | Self::LDA
                | Self::LDX
                | Self::LDY
                | Self::ORA
                | Self::SBC
        )
    }
}

/// One decoded opcode slot.
#[derive(Debug, Clone, Copy)]
pub struct OpInfo {
    /// The operation.
    pub op: Op,
    /// The addressing mode used to resolve its operand.
    pub mode: AddrMode,
    /// Base cycle count before any page-cross adjustment.
    pub cycles: u8,
}

impl OpInfo {
    const fn new(op: Op, mode: AddrMode, cycles: u8) -> Self {
        Self { op, mode, cycles }
    }

    /// Whether, for this slot, a page-crossing effective address earns an
    /// extra cycle: both the addressing mode and the operation must agree.
    #[must_use]
    pub const fn page_cross_extra(&self) -> bool {
        self.mode.page_cross_candidate() && self.op.is_page_cross_sensitive()
    }
}

const NOP_SLOT: OpInfo = OpInfo::new(Op::NOP, AddrMode::Imp, 2);

use AddrMode::{Abs, Abx, Aby, Acc, Imm, Imp, Ind, Izx, Izy, Rel, Zp0, Zpx, Zpy};
use Op::{
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS, CLC, CLD, CLI, CLV, CMP, CPX,
    CPY, DEC, DEX, DEY, EOR, INC, INX, INY, JMP, JSR, LDA, LDX, LDY, LSR, NOP, ORA, PHA, PHP, PLA,
    PLP, ROL, ROR, RTI, RTS, SBC, SEC, SED, SEI, STA, STX, STY, TAX, TAY, TSX, TXA, TXS, TYA,
};

/// The complete 256-entry opcode table, one slot per possible opcode byte.
/// Unofficial opcode bytes are filled with [`NOP_SLOT`].
#[rustfmt::skip]
pub static OPCODE_TABLE: [OpInfo; 256] = [
    // 0x0_
    OpInfo::new(BRK, Imp, 7), OpInfo::new(ORA, Izx, 6), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(ORA, Zp0, 3), OpInfo::new(ASL, Zp0, 5), NOP_SLOT,
    OpInfo::new(PHP, Imp, 3), OpInfo::new(ORA, Imm, 2), OpInfo::new(ASL, Acc, 2), NOP_SLOT,
    NOP_SLOT, OpInfo::new(ORA, Abs, 4), OpInfo::new(ASL, Abs, 6), NOP_SLOT,
    // 0x1_
    OpInfo::new(BPL, Rel, 2), OpInfo::new(ORA, Izy, 5), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(ORA, Zpx, 4), OpInfo::new(ASL, Zpx, 6), NOP_SLOT,
    OpInfo::new(CLC, Imp, 2), OpInfo::new(ORA, Aby, 4), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(ORA, Abx, 4), OpInfo::new(ASL, Abx, 7), NOP_SLOT,
    // 0x2_
    OpInfo::new(JSR, Abs, 6), OpInfo::new(AND, Izx, 6), NOP_SLOT, NOP_SLOT,
    OpInfo::new(BIT, Zp0, 3), OpInfo::new(AND, Zp0, 3), OpInfo::new(ROL, Zp0, 5), NOP_SLOT,
    OpInfo::new(PLP, Imp, 4), OpInfo::new(AND, Imm, 2), OpInfo::new(ROL, Acc, 2), NOP_SLOT,
    OpInfo::new(BIT, Abs, 4), OpInfo::new(AND, Abs, 4), OpInfo::new(ROL, Abs, 6), NOP_SLOT,
    // 0x3_
    OpInfo::new(BMI, Rel, 2), OpInfo::new(AND, Izy, 5), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(AND, Zpx, 4), OpInfo::new(ROL, Zpx, 6), NOP_SLOT,
    OpInfo::new(SEC, Imp, 2), OpInfo::new(AND, Aby, 4), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(AND, Abx, 4), OpInfo::new(ROL, Abx, 7), NOP_SLOT,
    // 0x4_
    OpInfo::new(RTI, Imp, 6), OpInfo::new(EOR, Izx, 6), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(EOR, Zp0, 3), OpInfo::new(LSR, Zp0, 5), NOP_SLOT,
    OpInfo::new(PHA, Imp, 3), OpInfo::new(EOR, Imm, 2), OpInfo::new(LSR, Acc, 2), NOP_SLOT,
    OpInfo::new(JMP, Abs, 3), OpInfo::new(EOR, Abs, 4), OpInfo::new(LSR, Abs, 6), NOP_SLOT,
    // 0x5_
    OpInfo::new(BVC, Rel, 2), OpInfo::new(EOR, Izy, 5), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(EOR, Zpx, 4), OpInfo::new(LSR, Zpx, 6), NOP_SLOT,
    OpInfo::new(CLI, Imp, 2), OpInfo::new(EOR, Aby, 4), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(EOR, Abx, 4), OpInfo::new(LSR, Abx, 7), NOP_SLOT,
    // 0x6_
    OpInfo::new(RTS, Imp, 6), OpInfo::new(ADC, Izx, 6), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(ADC, Zp0, 3), OpInfo::new(ROR, Zp0, 5), NOP_SLOT,
    OpInfo::new(PLA, Imp, 4), OpInfo::new(ADC, Imm, 2), OpInfo::new(ROR, Acc, 2), NOP_SLOT,
    OpInfo::new(JMP, Ind, 5), OpInfo::new(ADC, Abs, 4), OpInfo::new(ROR, Abs, 6), NOP_SLOT,
    // 0x7_
    OpInfo::new(BVS, Rel, 2), OpInfo::new(ADC, Izy, 5), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(ADC, Zpx, 4), OpInfo::new(ROR, Zpx, 6), NOP_SLOT,
    OpInfo::new(SEI, Imp, 2), OpInfo::new(ADC, Aby, 4), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(ADC, Abx, 4), OpInfo::new(ROR, Abx, 7), NOP_SLOT,
    // 0x8_
    NOP_SLOT, OpInfo::new(STA, Izx, 6), NOP_SLOT, NOP_SLOT,
    OpInfo::new(STY, Zp0, 3), OpInfo::new(STA, Zp0, 3), OpInfo::new(STX, Zp0, 3), NOP_SLOT,
    OpInfo::new(DEY, Imp, 2), NOP_SLOT, OpInfo::new(TXA, Imp, 2), NOP_SLOT,
    OpInfo::new(STY, Abs, 4), OpInfo::new(STA, Abs, 4), OpInfo::new(STX, Abs, 4), NOP_SLOT,
    // 0x9_
    OpInfo::new(BCC, Rel, 2), OpInfo::new(STA, Izy, 6), NOP_SLOT, NOP_SLOT,
    OpInfo::new(STY, Zpx, 4), OpInfo::new(STA, Zpx, 4), OpInfo::new(STX, Zpy, 4), NOP_SLOT,
    OpInfo::new(TYA, Imp, 2), OpInfo::new(STA, Aby, 5), OpInfo::new(TXS, Imp, 2), NOP_SLOT,
    NOP_SLOT, OpInfo::new(STA, Abx, 5), NOP_SLOT, NOP_SLOT,
    // 0xA_
    OpInfo::new(LDY, Imm, 2), OpInfo::new(LDA, Izx, 6), OpInfo::new(LDX, Imm, 2), NOP_SLOT,
    OpInfo::new(LDY, Zp0, 3), OpInfo::new(LDA, Zp0, 3), OpInfo::new(LDX, Zp0, 3), NOP_SLOT,
    OpInfo::new(TAY, Imp, 2), OpInfo::new(LDA, Imm, 2), OpInfo::new(TAX, Imp, 2), NOP_SLOT,
    OpInfo::new(LDY, Abs, 4), OpInfo::new(LDA, Abs, 4), OpInfo::new(LDX, Abs, 4), NOP_SLOT,
    // 0xB_
    OpInfo::new(BCS, Rel, 2), OpInfo::new(LDA, Izy, 5), NOP_SLOT, NOP_SLOT,
    OpInfo::new(LDY, Zpx, 4), OpInfo::new(LDA, Zpx, 4), OpInfo::new(LDX, Zpy, 4), NOP_SLOT,
    OpInfo::new(CLV, Imp, 2), OpInfo::new(LDA, Aby, 4), OpInfo::new(TSX, Imp, 2), NOP_SLOT,
    OpInfo::new(LDY, Abx, 4), OpInfo::new(LDA, Abx, 4), OpInfo::new(LDX, Aby, 4), NOP_SLOT,
    // 0xC_
    OpInfo::new(CPY, Imm, 2), OpInfo::new(CMP, Izx, 6), NOP_SLOT, NOP_SLOT,
    OpInfo::new(CPY, Zp0, 3), OpInfo::new(CMP, Zp0, 3), OpInfo::new(DEC, Zp0, 5), NOP_SLOT,
    OpInfo::new(INY, Imp, 2), OpInfo::new(CMP, Imm, 2), OpInfo::new(DEX, Imp, 2), NOP_SLOT,
    OpInfo::new(CPY, Abs, 4), OpInfo::new(CMP, Abs, 4), OpInfo::new(DEC, Abs, 6), NOP_SLOT,
    // 0xD_
    OpInfo::new(BNE, Rel, 2), OpInfo::new(CMP, Izy, 5), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(CMP, Zpx, 4), OpInfo::new(DEC, Zpx, 6), NOP_SLOT,
    OpInfo::new(CLD, Imp, 2), OpInfo::new(CMP, Aby, 4), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(CMP, Abx, 4), OpInfo::new(DEC, Abx, 7), NOP_SLOT,
    // 0xE_
    OpInfo::new(CPX, Imm, 2), OpInfo::new(SBC, Izx, 6), NOP_SLOT, NOP_SLOT,
    OpInfo::new(CPX, Zp0, 3), OpInfo::new(SBC, Zp0, 3), OpInfo::new(INC, Zp0, 5), NOP_SLOT,
    OpInfo::new(INX, Imp, 2), OpInfo::new(SBC, Imm, 2), OpInfo::new(NOP, Imp, 2), NOP_SLOT,
    OpInfo::new(CPX, Abs, 4), OpInfo::new(SBC, Abs, 4), OpInfo::new(INC, Abs, 6), NOP_SLOT,
    // 0xF_
    OpInfo::new(BEQ, Rel, 2), OpInfo::new(SBC, Izy, 5), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(SBC, Zpx, 4), OpInfo::new(INC, Zpx, 6), NOP_SLOT,
    OpInfo::new(SED, Imp, 2), OpInfo::new(SBC, Aby, 4), NOP_SLOT, NOP_SLOT,
    NOP_SLOT, OpInfo::new(SBC, Abx, 4), OpInfo::new(INC, Abx, 7), NOP_SLOT,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lda_immediate() {
        let slot = OPCODE_TABLE[0xA9];
        assert_eq!(slot.op, LDA);
        assert_eq!(slot.mode, Imm);
        assert_eq!(slot.cycles, 2);
    }

    #[test]
    fn jmp_indirect_uses_ind_mode() {
        assert_eq!(OPCODE_TABLE[0x6C].mode, Ind);
    }

    #[test]
    fn unofficial_byte_decodes_as_nop() {
        let slot = OPCODE_TABLE[0x02];
        assert_eq!(slot.op, NOP);
        assert_eq!(slot.cycles, 2);
        assert_eq!(slot.mode, Imp);
    }

    #[test]
    fn sta_absolute_x_is_not_page_cross_sensitive() {
        let slot = OPCODE_TABLE[0x9D];
        assert_eq!(slot.op, STA);
        assert!(!slot.page_cross_extra());
    }

    #[test]
    fn lda_absolute_x_is_page_cross_sensitive() {
        let slot = OPCODE_TABLE[0xBD];
        assert_eq!(slot.op, LDA);
        assert!(slot.page_cross_extra());
    }
}
