//! Command-line front end for the RustyNES emulation core.
//!
//! This binary has no windowing, blitting, or input handling: it loads a
//! ROM, runs it for a bounded number of frames, and prints register and
//! disassembly state to stdout. Anything resembling a display belongs to a
//! host embedding [`rustynes_core::NesCore`], not to this crate.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rustynes_core::NesCore;

/// Run an NES ROM headlessly and report CPU/PPU state.
#[derive(Debug, Parser)]
#[command(name = "rustynes", version, about)]
struct Args {
    /// Path to an iNES (.nes) ROM image.
    rom: PathBuf,

    /// Number of PPU frames to run before exiting.
    #[arg(short, long, default_value_t = 1)]
    frames: u32,

    /// Log each disassembled instruction as it steps.
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let rom_data = match std::fs::read(&args.rom) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("rustynes: failed to read {}: {err}", args.rom.display());
            return ExitCode::FAILURE;
        }
    };

    let mut console = match NesCore::with_rom(&rom_data) {
        Ok(console) => console,
        Err(err) => {
            eprintln!("rustynes: failed to load cartridge: {err}");
            return ExitCode::FAILURE;
        }
    };

    console.reset();
    log::info!("rustynes: loaded {}", args.rom.display());

    for frame in 0..args.frames {
        if args.trace {
            let (line, _next) = console.disassemble_one(console.cpu().pc);
            log::trace!("frame {frame}: {line}");
        }
        console.step_ppu_frame();
    }

    let cpu = console.cpu();
    println!(
        "pc={:#06x} a={:#04x} x={:#04x} y={:#04x} sp={:#04x} status={:#010b}",
        cpu.pc,
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.sp,
        cpu.status.bits()
    );
    println!("system_clock={}", console.bus().system_clock());

    ExitCode::SUCCESS
}
