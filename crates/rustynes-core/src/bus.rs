//! NES system bus: address decoding between CPU, PPU register window,
//! system RAM, and the cartridge.

use rustynes_cpu::Bus;
use rustynes_mappers::Cartridge;
use rustynes_ppu::{Ppu, PpuBus};

/// Adapts the bus's owned [`Cartridge`] to the PPU's [`PpuBus`] trait so the
/// PPU never stores a cartridge back-pointer; a fresh instance is built for
/// each PPU register access.
struct CartridgePpuBus<'a> {
    cartridge: Option<&'a mut Cartridge>,
}

impl PpuBus for CartridgePpuBus<'_> {
    fn cart_ppu_read(&self, addr: u16) -> Option<u8> {
        self.cartridge.as_ref().and_then(|c| c.ppu_read(addr))
    }

    fn cart_ppu_write(&mut self, addr: u16, data: u8) -> bool {
        self.cartridge
            .as_mut()
            .is_some_and(|c| c.ppu_write(addr, data))
    }
}

/// NES system bus connecting the CPU, PPU, RAM, and cartridge.
///
/// The cartridge is consulted first on every CPU access (see
/// [`Self::read`]/[`Self::write`]); the 0x4000..=0x4017 APU/IO range is a
/// stub that always reads 0 and ignores writes, since this core implements
/// no APU.
pub struct NesBus {
    ram: [u8; 0x0800],
    cartridge: Option<Cartridge>,
    ppu: Ppu,
    system_clock: u64,
}

impl Default for NesBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NesBus {
    /// Construct a bus with no cartridge inserted yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: [0; 0x0800],
            cartridge: None,
            ppu: Ppu::new(),
            system_clock: 0,
        }
    }

    /// Insert a cartridge, replacing any previously inserted one.
    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    /// The PPU, for diagnostics and framebuffer access.
    #[must_use]
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// The monotonic master-clock tick counter.
    #[must_use]
    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }

    /// Clock the PPU once; every third call also clocks the CPU (driven by
    /// the caller, which owns the [`rustynes_cpu::Cpu`] this bus services).
    /// Returns whether this tick should also clock the CPU.
    pub fn clock(&mut self) -> bool {
        self.ppu.clock();
        let clock_cpu = self.system_clock % 3 == 0;
        self.system_clock += 1;
        clock_cpu
    }

    /// Reset bus-owned state (RAM and PPU). Does not touch the cartridge.
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.ppu.reset();
        self.system_clock = 0;
    }

    /// Clear the PPU's `frame_complete` flag after a caller has observed it.
    pub fn clear_ppu_frame_complete(&mut self) {
        self.ppu.frame_complete = false;
    }
}

impl Bus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        if let Some(value) = self
            .cartridge
            .as_ref()
            .and_then(|cartridge| cartridge.cpu_read(addr))
        {
            return value;
        }

        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            0x2000..=0x3FFF => {
                let mut ppu_bus = CartridgePpuBus {
                    cartridge: self.cartridge.as_mut(),
                };
                self.ppu.cpu_read(addr, &mut ppu_bus)
            }
            0x4000..=0x4017 => 0,
            _ => 0,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some(cartridge) = self.cartridge.as_mut() {
            if cartridge.cpu_write(addr, value) {
                return;
            }
        }

        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)] = value,
            0x2000..=0x3FFF => {
                let mut ppu_bus = CartridgePpuBus {
                    cartridge: self.cartridge.as_mut(),
                };
                self.ppu.cpu_write(addr, value, &mut ppu_bus);
            }
            0x4000..=0x4017 => {}
            _ => {}
        }
    }

    /// Read without side effects: no PPU register latch changes, no
    /// cartridge state changes. `$2000..=$3FFF` reads as 0 since the PPU's
    /// register window has read side effects on real hardware (status
    /// clearing the VBlank bit, data-port buffer refresh) with no
    /// side-effect-free equivalent to fall back to.
    fn peek(&self, addr: u16) -> u8 {
        if let Some(value) = self
            .cartridge
            .as_ref()
            .and_then(|cartridge| cartridge.cpu_read(addr))
        {
            return value;
        }
        match addr {
            0x0000..=0x1FFF => self.ram[usize::from(addr & 0x07FF)],
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rom_bytes() -> Vec<u8> {
        let mut bytes = vec![0x4E, 0x45, 0x53, 0x1A, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        bytes.extend(vec![0xEA; 32_768]);
        bytes.extend(vec![0; 8192]);
        bytes
    }

    #[test]
    fn ram_mirrors_four_times() {
        let mut bus = NesBus::new();
        Bus::write(&mut bus, 0x0000, 0x42);
        assert_eq!(Bus::read(&mut bus, 0x0800), 0x42);
        assert_eq!(Bus::read(&mut bus, 0x1000), 0x42);
        assert_eq!(Bus::read(&mut bus, 0x1800), 0x42);
    }

    #[test]
    fn ppu_registers_mirror_every_eight_bytes() {
        let mut bus = NesBus::new();
        Bus::write(&mut bus, 0x2000, 0x80);
        let a = Bus::read(&mut bus, 0x2002);
        let b = Bus::read(&mut bus, 0x2008 + 2);
        assert_eq!(a, b);
    }

    #[test]
    fn cartridge_takes_priority_over_ram() {
        let mut bus = NesBus::new();
        let cartridge = Cartridge::load(&test_rom_bytes()).unwrap();
        bus.insert_cartridge(cartridge);
        assert_eq!(Bus::read(&mut bus, 0x8000), 0xEA);
    }

    #[test]
    fn apu_stub_reads_zero_and_ignores_writes() {
        let mut bus = NesBus::new();
        Bus::write(&mut bus, 0x4000, 0xFF);
        assert_eq!(Bus::read(&mut bus, 0x4000), 0);
    }

    #[test]
    fn clock_drives_cpu_every_third_tick() {
        let mut bus = NesBus::new();
        let flags: Vec<bool> = (0..6).map(|_| bus.clock()).collect();
        assert_eq!(flags, vec![true, false, false, true, false, false]);
    }
}
