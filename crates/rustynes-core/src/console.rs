//! `NESCore`: the top-level console, wiring the CPU to the bus and
//! exposing the three ways a host can advance emulation.

use rustynes_cpu::{disassemble_one, Bus, Cpu, Disassembler};
use rustynes_mappers::{Cartridge, RomError};

use crate::bus::NesBus;

/// Errors surfaced while constructing a console.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConsoleError {
    /// The supplied ROM bytes could not be loaded.
    #[error("failed to load cartridge: {0}")]
    Rom(#[from] RomError),
}

/// The assembled NES console: CPU plus bus (PPU, RAM, cartridge).
///
/// The host drives emulation by calling [`Self::clock`],
/// [`Self::step_cpu_instruction`], or [`Self::step_ppu_frame`]; nothing
/// here spawns threads or blocks.
pub struct NesCore {
    cpu: Cpu,
    bus: NesBus,
}

impl Default for NesCore {
    fn default() -> Self {
        Self::new()
    }
}

impl NesCore {
    /// Construct a console with no cartridge inserted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            bus: NesBus::new(),
        }
    }

    /// Construct a console and immediately load `rom_data` as its
    /// cartridge.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Rom`] if the ROM fails to parse or uses an
    /// unsupported mapper.
    pub fn with_rom(rom_data: &[u8]) -> Result<Self, ConsoleError> {
        let mut core = Self::new();
        core.load_rom(rom_data)?;
        Ok(core)
    }

    /// Parse and insert a cartridge, replacing any previously inserted one.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Rom`] if the ROM fails to parse or uses an
    /// unsupported mapper.
    pub fn load_rom(&mut self, rom_data: &[u8]) -> Result<(), ConsoleError> {
        let cartridge = Cartridge::load(rom_data)?;
        self.bus.insert_cartridge(cartridge);
        Ok(())
    }

    /// Reset: reload RAM/PPU to power-on state and reset the CPU through
    /// the vector at `$FFFC`.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
    }

    /// Advance the master clock by one tick: clock the PPU, and clock the
    /// CPU on every third tick.
    pub fn clock(&mut self) {
        if self.bus.clock() {
            self.cpu.clock(&mut self.bus);
        }
    }

    /// Clock until the CPU's current instruction completes, then run one
    /// full instruction.
    pub fn step_cpu_instruction(&mut self) {
        while !self.cpu.cycle_complete() {
            self.clock();
        }
        loop {
            self.clock();
            if !self.cpu.cycle_complete() {
                break;
            }
        }
        while !self.cpu.cycle_complete() {
            self.clock();
        }
    }

    /// Clock until the PPU completes a frame, then finish the in-flight
    /// CPU instruction, then clear `frame_complete`.
    pub fn step_ppu_frame(&mut self) {
        while !self.bus.ppu().frame_complete {
            self.clock();
        }
        while !self.cpu.cycle_complete() {
            self.clock();
        }
        self.clear_frame_complete();
    }

    fn clear_frame_complete(&mut self) {
        // frame_complete lives on the PPU, which the bus owns; there is no
        // public setter, so step through one more clock-free accessor path.
        self.bus.clear_ppu_frame_complete();
    }

    /// The CPU, for diagnostics.
    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The bus, for diagnostics (PPU access, raw memory inspection).
    #[must_use]
    pub fn bus(&self) -> &NesBus {
        &self.bus
    }

    /// Read a CPU-bus address without side effects, for debugger/inspector
    /// use. PPU register reads are *not* side-effect free on real hardware,
    /// so this intentionally does not forward to the live bus for
    /// `$2000..=$3FFF`; [`Bus::peek`] already returns 0 for that window.
    #[must_use]
    pub fn cpu_read_readonly(&self, addr: u16) -> u8 {
        Bus::peek(&self.bus, addr)
    }

    /// Disassemble `[start, end)` into an ordered address-to-text map.
    #[must_use]
    pub fn disassemble(&self, start: u16, end: u16) -> Disassembler {
        let mut disasm = Disassembler::new();
        disasm.disassemble_range(start, end, &self.bus);
        disasm
    }

    /// Disassemble a single instruction at `addr` without advancing
    /// anything, returning the rendered line and the address of the next
    /// instruction.
    #[must_use]
    pub fn disassemble_one(&self, addr: u16) -> (String, u16) {
        disassemble_one(addr, &self.bus)
    }
}
