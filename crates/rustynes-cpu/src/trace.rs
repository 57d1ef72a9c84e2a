//! Instruction disassembler.
//!
//! Renders a single instruction as one line of text: an address, the
//! mnemonic, and an operand rendering that names the addressing mode used
//! to resolve it. Reads are non-mutating (`Bus::peek`), so disassembling
//! never perturbs the machine being inspected.

use crate::addressing::AddrMode;
use crate::bus::Bus;
use crate::opcode::OPCODE_TABLE;
use std::collections::BTreeMap;

fn peek_u16(bus: &impl Bus, addr: u16) -> u16 {
    let lo = u16::from(bus.peek(addr));
    let hi = u16::from(bus.peek(addr.wrapping_add(1)));
    (hi << 8) | lo
}

/// Disassemble the instruction at `addr`, returning the rendered line and
/// the address immediately following it.
#[must_use]
pub fn disassemble_one(addr: u16, bus: &impl Bus) -> (String, u16) {
    let opcode = bus.peek(addr);
    let info = OPCODE_TABLE[opcode as usize];
    let mnemonic = info.op.mnemonic();
    let operand_addr = addr.wrapping_add(1);

    let operand = match info.mode {
        AddrMode::Imp | AddrMode::Acc => "(IMP)".to_string(),
        AddrMode::Imm => {
            let value = bus.peek(operand_addr);
            format!("#${value:02X} (IMM)")
        }
        AddrMode::Zp0 => {
            let value = bus.peek(operand_addr);
            format!("${value:02X} (ZP0)")
        }
        AddrMode::Zpx => {
            let value = bus.peek(operand_addr);
            format!("${value:02X},X (ZPX)")
        }
        AddrMode::Zpy => {
            let value = bus.peek(operand_addr);
            format!("${value:02X},Y (ZPY)")
        }
        AddrMode::Abs => {
            let target = peek_u16(bus, operand_addr);
            format!("${target:04X} (ABS)")
        }
        AddrMode::Abx => {
            let target = peek_u16(bus, operand_addr);
            format!("${target:04X},X (ABX)")
        }
        AddrMode::Aby => {
            let target = peek_u16(bus, operand_addr);
            format!("${target:04X},Y (ABY)")
        }
        AddrMode::Ind => {
            let ptr = peek_u16(bus, operand_addr);
            format!("#${ptr:04X} (IND)")
        }
        AddrMode::Izx => {
            let zp = bus.peek(operand_addr);
            format!("(${zp:02X},X) (IZX)")
        }
        AddrMode::Izy => {
            let zp = bus.peek(operand_addr);
            format!("(${zp:02X}),Y (IZY)")
        }
        AddrMode::Rel => {
            let offset = bus.peek(operand_addr);
            let signed = if offset & 0x80 != 0 {
                u16::from(offset) | 0xFF00
            } else {
                u16::from(offset)
            };
            let next = addr.wrapping_add(2);
            let target = next.wrapping_add(signed);
            format!("${offset:02X} [${target:04X}] (REL)")
        }
    };

    let line = format!("{addr:04X}: {mnemonic} {operand}");
    let next_addr = addr.wrapping_add(1 + u16::from(info.mode.operand_size()));
    (line, next_addr)
}

/// Builds a disassembly listing across an address range, keyed by the
/// starting address of each decoded instruction.
#[derive(Debug, Default)]
pub struct Disassembler {
    lines: BTreeMap<u16, String>,
}

impl Disassembler {
    /// Create an empty disassembler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BTreeMap::new(),
        }
    }

    /// Disassemble instructions starting at `start` until `end` (exclusive)
    /// is reached or passed.
    pub fn disassemble_range(&mut self, start: u16, end: u16, bus: &impl Bus) {
        let mut addr = start;
        while addr < end {
            let (line, next) = disassemble_one(addr, bus);
            self.lines.insert(addr, line);
            if next <= addr {
                break;
            }
            addr = next;
        }
    }

    /// The rendered line for the instruction at `addr`, if one was decoded.
    #[must_use]
    pub fn line_at(&self, addr: u16) -> Option<&str> {
        self.lines.get(&addr).map(String::as_str)
    }

    /// All decoded lines in address order.
    #[must_use]
    pub fn lines(&self) -> impl Iterator<Item = (&u16, &String)> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestBus {
        mem: [u8; 0x10000],
    }

    impl TestBus {
        fn new() -> Self {
            Self { mem: [0; 0x10000] }
        }

        fn load(&mut self, addr: u16, bytes: &[u8]) {
            for (i, b) in bytes.iter().enumerate() {
                self.mem[addr as usize + i] = *b;
            }
        }
    }

    impl Bus for TestBus {
        fn read(&mut self, addr: u16) -> u8 {
            self.mem[addr as usize]
        }

        fn write(&mut self, addr: u16, value: u8) {
            self.mem[addr as usize] = value;
        }

        fn peek(&self, addr: u16) -> u8 {
            self.mem[addr as usize]
        }
    }

    #[test]
    fn immediate_operand_format() {
        let mut bus = TestBus::new();
        bus.load(0x8000, &[0xA9, 0x42]);
        let (line, next) = disassemble_one(0x8000, &bus);
        assert_eq!(line, "8000: LDA #$42 (IMM)");
        assert_eq!(next, 0x8002);
    }

    #[test]
    fn absolute_operand_format() {
        let mut bus = TestBus::new();
        bus.load(0x8000, &[0x4C, 0x34, 0x12]);
        let (line, _) = disassemble_one(0x8000, &bus);
        assert_eq!(line, "8000: JMP $1234 (ABS)");
    }

    #[test]
    fn indirect_operand_format() {
        let mut bus = TestBus::new();
        bus.load(0x8000, &[0x6C, 0x00, 0x90]);
        let (line, _) = disassemble_one(0x8000, &bus);
        assert_eq!(line, "8000: JMP #$9000 (IND)");
    }

    #[test]
    fn relative_operand_format() {
        let mut bus = TestBus::new();
        bus.load(0x8000, &[0xF0, 0x05]);
        let (line, _) = disassemble_one(0x8000, &bus);
        assert_eq!(line, "8000: BEQ $05 [$8007] (REL)");
    }

    #[test]
    fn implied_operand_format() {
        let mut bus = TestBus::new();
        bus.load(0x8000, &[0xEA]);
        let (line, next) = disassemble_one(0x8000, &bus);
        assert_eq!(line, "8000: NOP (IMP)");
        assert_eq!(next, 0x8001);
    }

    #[test]
    fn disassembler_builds_ordered_range() {
        let mut bus = TestBus::new();
        bus.load(0x8000, &[0xA9, 0x01, 0xEA, 0x00]);
        let mut disasm = Disassembler::new();
        disasm.disassemble_range(0x8000, 0x8003, &bus);
        assert_eq!(disasm.line_at(0x8000), Some("8000: LDA #$01 (IMM)"));
        assert_eq!(disasm.line_at(0x8002), Some("8002: NOP (IMP)"));
        assert_eq!(disasm.lines().count(), 2);
    }
}
