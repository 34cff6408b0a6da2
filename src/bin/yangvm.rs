//! Loads and runs a yang executable.
//!
//! Usage: `yangvm <file.yang> [--ticks N] [--budget N] [--realtime] [--disassemble]`

use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info, warn};

use yang::executable::Program;
use yang::runtime::{Engine, EngineConfig, ProgramRegistry};

mod shared;

/// Tick interval in realtime mode (60 Hz).
const TICK_INTERVAL: Duration = Duration::from_micros(16_600);

#[derive(Parser, Debug)]
#[command(name = "yangvm")]
#[command(about = "Run a yang executable on the tick driven VM")]
struct Args {
    /// Executable file
    path: PathBuf,

    /// Maximum number of ticks to run
    #[arg(long, default_value = "100000")]
    ticks: u64,

    /// Instructions executed per tick
    #[arg(long, default_value = "1")]
    budget: u32,

    /// Tick at roughly 60 Hz instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print the disassembled program and exit
    #[arg(long)]
    disassemble: bool,
}

fn main() {
    shared::init_logging();

    let args = Args::parse();

    if args.disassemble {
        let program = std::fs::read(&args.path)
            .map_err(|err| err.to_string())
            .and_then(|bytes| Program::from_bytes(&bytes).map_err(|err| err.to_string()));
        match program {
            Ok(program) => print!("{}", program.disassemble()),
            Err(err) => {
                error!("{}: {}", args.path.display(), err);
                process::exit(1);
            }
        }
        return;
    }

    let engine = Engine::new(EngineConfig { instructions_per_tick: args.budget, ..EngineConfig::default() });
    let mut registry = ProgramRegistry::new();

    let id = match engine.load(&mut registry, &args.path) {
        Ok(id) => id,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    if let Err(err) = engine.execute(&mut registry, id) {
        error!("{}", err);
        process::exit(1);
    }

    let started = Instant::now();
    let mut ticks = 0;

    while ticks < args.ticks && registry.get(id).map_or(false, |program| program.is_running()) {
        let tick_start = Instant::now();
        for err in engine.tick(&mut registry) {
            warn!("{}", err);
        }
        ticks += 1;
        if args.realtime {
            if let Some(remaining) = TICK_INTERVAL.checked_sub(tick_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    info!("Ran {} ticks in {:.3}s", ticks, started.elapsed().as_secs_f64());

    match registry.get(id) {
        Some(program) => {
            info!("Program '{}' is {:?}", program.name(), program.state());
            for (index, value) in program.registers().iter().enumerate() {
                let name = match index {
                    8 => "pc".to_string(),
                    9 => "cond".to_string(),
                    _ => format!("r{}", index),
                };
                println!("{:>4} = {:#018x} ({})", name, value, *value as u32 as i32);
            }
        }
        None => {
            error!("Program terminated with a runtime error");
            process::exit(1);
        }
    }
}
