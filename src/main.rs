//! Command-line front end: load an iNES ROM and run it, optionally emitting
//! an nestest-style execution trace, or drive the bundled "snake" bus-contract
//! demo as a smoke test of the host-callback hook.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use rand::Rng;
use thiserror::Error;

use nes6502::bus::Bus;
use nes6502::cpu::Cpu;
use nes6502::error::{CpuError, RomError};
use nes6502::rom::{Mirroring, Rom};

const SCREEN_ADDR: u16 = 0x0200;
const SCREEN_SIZE: u16 = 1024;
const SCREEN_SIDE: usize = 32;
const ENTROPY_ADDR: u16 = 0x00FE;
const INPUT_ADDR: u16 = 0x00FF;

#[derive(Parser)]
#[command(name = "nes6502", about = "A standalone MOS 6502/2A03 instruction-set interpreter")]
struct Cli {
    /// Path to an iNES ROM image. Omitted when running with --demo.
    rom: Option<PathBuf>,

    /// Write an nestest-style execution trace to this file, one line per instruction.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Override the program counter after reset (hex, e.g. C000).
    #[arg(long)]
    entry: Option<String>,

    /// Run the built-in "snake" bus-contract smoke test instead of loading a ROM.
    #[arg(long)]
    demo: bool,

    /// Stop after this many instructions (0 = unbounded).
    #[arg(long, default_value_t = 0)]
    max_steps: u64,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Rom(#[from] RomError),
    #[error(transparent)]
    Cpu(#[from] CpuError),
    #[error("--entry value {0:?} is not a valid 16-bit hex address")]
    BadEntry(String),
    #[error("--rom is required unless --demo is set")]
    MissingRom,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = if cli.demo { run_demo(&cli) } else { run_rom(&cli) };

    if let Err(err) = result {
        eprintln!("nes6502: {err}");
        std::process::exit(1);
    }
}

fn run_rom(cli: &Cli) -> Result<(), AppError> {
    let path = cli.rom.as_ref().ok_or(AppError::MissingRom)?;
    let data = std::fs::read(path)?;
    let rom = Rom::parse(&data)?;
    let mut cpu = Cpu::new(Bus::new(rom));
    cpu.reset();

    if let Some(entry) = &cli.entry {
        let addr = u16::from_str_radix(entry.trim_start_matches("0x"), 16)
            .map_err(|_| AppError::BadEntry(entry.clone()))?;
        cpu.program_counter = addr;
    }

    if let Some(path) = &cli.trace {
        let file = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
        cpu.open_trace_log(file);
    }

    let mut steps = 0u64;
    let max_steps = cli.max_steps;

    cpu.run_with_callback(|cpu| {
        steps += 1;
        if max_steps != 0 && steps >= max_steps {
            cpu.halted = true;
        }
    })?;

    Ok(())
}

fn run_demo(cli: &Cli) -> Result<(), AppError> {
    let rom = build_demo_rom();
    let mut cpu = Cpu::new(Bus::new(rom));
    cpu.reset();

    let keys = spawn_stdin_reader();
    let mut rng = rand::thread_rng();
    let mut ticks = 0u64;
    let max_steps = cli.max_steps;

    cpu.run_with_callback(|cpu| {
        cpu.bus.write_u8(ENTROPY_ADDR, rng.gen());

        if let Ok(key) = keys.try_recv() {
            if let Some(code) = key_code(key) {
                cpu.bus.write_u8(INPUT_ADDR, code);
            }
        }

        ticks += 1;
        if ticks % 200 == 0 {
            print_screen(cpu);
        }
        if max_steps != 0 && ticks >= max_steps {
            cpu.halted = true;
        }
    })?;

    Ok(())
}

/// Maps the "snake" demo's arrow-key-like stdin characters to the byte codes
/// it expects written at `0x00FF` (w/a/s/d, matching the original keyboard hook).
fn key_code(key: char) -> Option<u8> {
    match key {
        'w' => Some(0x77),
        'a' => Some(0x61),
        's' => Some(0x73),
        'd' => Some(0x64),
        _ => None,
    }
}

/// Reads stdin on a background thread so the step loop never blocks waiting
/// for a keypress; each line's characters are queued for the next ticks to consume.
fn spawn_stdin_reader() -> mpsc::Receiver<char> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        loop {
            line.clear();
            if std::io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
                break;
            }
            for ch in line.trim().chars() {
                if tx.send(ch).is_err() {
                    return;
                }
            }
        }
    });
    rx
}

fn print_screen(cpu: &mut Cpu) {
    let chunk = cpu.bus.read_chunk(SCREEN_ADDR, SCREEN_SIZE);
    let mut rendered = String::with_capacity(chunk.len() + SCREEN_SIDE);
    for row in chunk.chunks(SCREEN_SIDE) {
        for &cell in row {
            rendered.push(match cell {
                0x00 => ' ',
                0x01 => '#',
                _ => 'o',
            });
        }
        rendered.push('\n');
    }
    print!("\x1B[2J\x1B[H{rendered}");
}

/// Builds a minimal one-bank NROM image containing a tiny loop that mirrors
/// the snake bus contract: it copies the entropy byte and the last pressed
/// key into the first two cells of screen memory, proving the callback hook
/// and the magic addresses work without a real game ROM.
fn build_demo_rom() -> Rom {
    const PRG_SIZE: usize = 0x4000;
    let mut prg_rom = vec![0xEA; PRG_SIZE]; // NOP-filled

    let program: [u8; 13] = [
        0xA5, 0xFE, // LDA $FE        (entropy)
        0x8D, 0x00, 0x02, // STA $0200
        0xA5, 0xFF, // LDA $FF        (input)
        0x8D, 0x01, 0x02, // STA $0201
        0x4C, 0x00, 0x80, // JMP $8000
    ];
    prg_rom[0..program.len()].copy_from_slice(&program);

    // Reset vector 0xFFFC/0xFFFD mirrors onto PRG offset 0x3FFC/0x3FFD for a
    // single 16 KiB bank; point it at the start of the loop above.
    prg_rom[0x3FFC] = 0x00;
    prg_rom[0x3FFD] = 0x80;

    Rom {
        prg_rom,
        chr_rom: Vec::new(),
        mapper: 0,
        mirroring: Mirroring::Horizontal,
        has_persistent_memory: false,
    }
}
