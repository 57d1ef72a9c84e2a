//! End-to-end scenarios driving the assembled console (CPU + bus + PPU)
//! through a cartridge, rather than the CPU crate's bus-stub tests.

use rustynes_core::{Bus, NesCore};

fn rom_with_program(program: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0x4E, 0x45, 0x53, 0x1A, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    let mut prg = vec![0xEAu8; 32_768];
    prg[..program.len()].copy_from_slice(program);
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    bytes.extend(prg);
    bytes.extend(vec![0u8; 8192]);
    bytes
}

fn run(program: &[u8], instructions: usize) -> NesCore {
    let mut core = NesCore::with_rom(&rom_with_program(program)).unwrap();
    core.reset();
    for _ in 0..instructions {
        core.step_cpu_instruction();
    }
    core
}

#[test]
fn multiply_by_addition() {
    let program = [
        0xA2, 0x0A, 0x8E, 0x00, 0x00, 0xA2, 0x03, 0x8E, 0x01, 0x00, 0xAC, 0x00, 0x00, 0xA9, 0x00,
        0x38, 0x18, 0x6D, 0x01, 0x00, 0x88, 0xD0, 0xFA, 0x8D, 0x02, 0x00, 0xEA, 0xEA, 0xEA,
    ];
    let core = run(&program, 200);
    assert_eq!(Bus::peek(core.bus(), 0x0002), 30);
}

#[test]
fn jsr_rts_round_trip() {
    let program = [0x20, 0x07, 0x80, 0x00, 0x00, 0x00, 0x00, 0x60];
    let core = run(&program, 2);
    assert_eq!(core.cpu().pc, 0x8003);
    assert_eq!(core.cpu().sp, 0xFD);
}

#[test]
fn ram_mirrors_across_the_whole_console() {
    // LDA #$42; STA $0000
    let program = [0xA9, 0x42, 0x8D, 0x00, 0x00];
    let core = run(&program, 2);
    assert_eq!(Bus::peek(core.bus(), 0x0800), 0x42);
    assert_eq!(Bus::peek(core.bus(), 0x1800), 0x42);
}

#[test]
fn framebuffer_advance_completes_one_frame_and_clears_the_flag() {
    let mut core = NesCore::with_rom(&rom_with_program(&[])).unwrap();
    core.reset();
    core.step_ppu_frame();
    assert!(!core.bus().ppu().frame_complete);
    assert_eq!(core.bus().ppu().position(), (0, 0));
}
